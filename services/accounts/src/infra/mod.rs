pub mod db;
pub mod mail;
pub mod password;
pub mod social;
pub mod tasks;
pub mod token;
