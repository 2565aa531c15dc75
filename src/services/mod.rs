pub mod allocator;
pub mod chunker;
pub mod generation_service;
pub mod grading_service;
pub mod model_client;
pub mod parser;
pub mod session;
pub mod stats_service;
