pub mod api;
pub mod cache;
pub mod db;
pub mod models;
pub mod portfolio;
pub mod services;

#[cfg(test)]
mod test;
