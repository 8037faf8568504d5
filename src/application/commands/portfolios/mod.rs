mod command;
mod create;
mod service;

pub use command::{CreatePortfolioCommand, CreatePortfolioCommandBuilder, ProjectUpload, UploadedFile};
pub use service::PortfolioCommandService;
