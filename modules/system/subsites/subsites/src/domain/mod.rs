pub mod chrome;
pub mod directory;
pub mod evaluator;
pub mod request;
pub mod resolver;
pub mod sections;
pub mod service;
pub mod state;
pub mod visibility;
