use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::config::ImageConfig;
use crate::domain::product::ProductView;
use crate::forms::products::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{ApiResponse, error_response};
use crate::services::{ServiceError, ServiceResult, products};

const PRODUCT_NOT_FOUND: &str = "Product not found.";

fn failure(action: &str, err: ServiceError) -> HttpResponse {
    if let ServiceError::Persistence(_) = err {
        log::error!("Failed to {action}: {err}");
    }
    error_response(&err, PRODUCT_NOT_FOUND)
}

fn products_listed(result: ServiceResult<Vec<ProductView>>) -> HttpResponse {
    match result {
        Ok(items) => HttpResponse::Ok().json(ApiResponse::with_data(
            "Products retrieved successfully.",
            items,
        )),
        Err(err) => failure("list products", err),
    }
}

fn product_shown(product_id: &str, result: ServiceResult<ProductView>) -> HttpResponse {
    match result {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::with_data(
            "Product retrieved successfully.",
            product,
        )),
        Err(err) => failure(&format!("load product {product_id}"), err),
    }
}

fn product_created(result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::success_null("Product created successfully."))
        }
        Err(err) => failure("create product", err),
    }
}

fn product_updated(product_id: &str, result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Product updated successfully.")),
        Err(err) => failure(&format!("update product {product_id}"), err),
    }
}

fn product_deleted(product_id: &str, result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Product deleted successfully.")),
        Err(err) => failure(&format!("delete product {product_id}"), err),
    }
}

#[get("/products")]
pub async fn show_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    products_listed(products::list_products(repo.get_ref(), &user))
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    product_shown(
        &product_id,
        products::get_product(repo.get_ref(), &user, &product_id),
    )
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    image_config: web::Data<ImageConfig>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    let (fields, uploads) = form.into_parts();

    product_created(products::create_product(
        repo.get_ref(),
        &user,
        fields,
        uploads,
        &image_config,
    ))
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    image_config: web::Data<ImageConfig>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let (fields, uploads) = form.into_parts();

    product_updated(
        &product_id,
        products::update_product(
            repo.get_ref(),
            &user,
            &product_id,
            fields,
            uploads,
            &image_config,
        ),
    )
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    product_deleted(
        &product_id,
        products::delete_product(repo.get_ref(), &user, &product_id),
    )
}
