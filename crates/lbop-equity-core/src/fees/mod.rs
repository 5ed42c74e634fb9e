pub mod aggregator;
pub mod schedule;

pub use aggregator::{aggregate_fees, build_fee_schedule, FeeAggregationInput, FeeAggregationOutput};
pub use schedule::{BasisField, FeeDefinition, FeeLine, FeeRule, FeeSchedule, FeeSource};
