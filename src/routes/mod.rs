pub mod health_route;
pub mod organization_route;
