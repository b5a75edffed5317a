//! Business logic services for the retail inventory backend

pub mod alert;
pub mod evaluator;
pub mod inventory;
pub mod notification;
pub mod reporting;
pub mod scheduler;

pub use alert::AlertService;
pub use evaluator::{AlertEvaluator, PassReport};
pub use inventory::{InventoryService, ProductEdit};
pub use notification::{
    sender_from_config, HttpMailSender, NotificationDispatcher, NotificationSender,
    StockAlertMessage, TracingSender,
};
pub use reporting::{ReportFilter, ReportingService};
pub use scheduler::{AlertScheduler, SchedulerHandle};
