mod report_service;
mod subscription_service;

pub use report_service::{ReportFilter, ReportService};
pub use subscription_service::SubscriptionService;
