use crate::api;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::customers::register,
        api::customers::login,
        api::customers::me,
        api::customers::list_customers,
        api::customers::get_customer,
        api::customers::customer_exists,
        api::staff::login,
        api::staff::list_staff,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::get_stock,
        api::books::adjust_stock,
        api::books::rate_book,
        api::books::recommendations,
        api::cart::view_cart,
        api::cart::add_item,
        api::cart::update_item,
        api::cart::remove_item,
        api::cart::clear_cart,
        api::orders::list_shipping_methods,
        api::orders::list_payment_methods,
        api::orders::checkout,
        api::orders::list_orders,
        api::orders::get_order,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::Customer,
            crate::models::StaffMember,
            api::customers::RegisterRequest,
            api::customers::LoginRequest,
            api::books::CreateBookRequest,
            api::books::StockChangeRequest,
            api::books::RatingRequest,
            api::cart::AddItemRequest,
            api::cart::UpdateItemRequest,
            api::orders::CheckoutRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "bookstore", description = "Bookstore API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
