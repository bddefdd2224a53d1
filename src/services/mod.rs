pub mod csv_export;
pub mod generation_client;
pub mod question_service;
pub mod response_parser;
