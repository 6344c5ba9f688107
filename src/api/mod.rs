pub mod keksobooking_client;
pub mod submission;
