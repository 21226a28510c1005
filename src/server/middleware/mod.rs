pub mod user_validator;
