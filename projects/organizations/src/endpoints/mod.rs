pub mod health;
pub mod organizations;
