#[path = "property/tree_queries.rs"]
mod tree_queries;

#[path = "property/distance_metric.rs"]
mod distance_metric;

#[path = "property/fact_completeness.rs"]
mod fact_completeness;
