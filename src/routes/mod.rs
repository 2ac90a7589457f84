pub mod auth_route;
