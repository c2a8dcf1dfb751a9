//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "message": "An internal server error occurred",
        "statusCode": 500,
        "error": "INTERNAL_ERROR",
        "code": 1005
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "message": "Name is required and must be a string",
        "statusCode": 400,
        "error": "VALIDATION_ERROR",
        "code": 1001
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "message": "Query parameter \"name\" is required",
        "statusCode": 400,
        "error": "BAD_REQUEST",
        "code": 1008
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "Product with ID 999 not found",
        "statusCode": 404,
        "error": "NOT_FOUND",
        "code": 1004
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - API key missing",
    content_type = "application/json",
    example = json!({
        "message": "API key is missing",
        "statusCode": 401,
        "error": "UNAUTHORIZED",
        "code": 1006
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - API key rejected",
    content_type = "application/json",
    example = json!({
        "message": "Invalid API key",
        "statusCode": 403,
        "error": "FORBIDDEN",
        "code": 1007
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);
