use utoipa::OpenApi;

use passeador_auth::TokenClaims;
use passeador_core::ErrorResponse;
use passeador_models::{LoginRequest, Passeador, PasseadorDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::passeadores::controller::list_passeadores,
        crate::modules::passeadores::controller::get_passeador,
        crate::modules::passeadores::controller::create_passeador,
        crate::modules::passeadores::controller::update_passeador,
        crate::modules::passeadores::controller::delete_passeador,
        crate::modules::passeadores::controller::login_passeador,
    ),
    components(
        schemas(
            Passeador,
            PasseadorDto,
            LoginRequest,
            TokenClaims,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Passeadores", description = "Dog-walker accounts and login")
    ),
    info(
        title = "Passeador API",
        version = "0.1.0",
        description = "REST API for dog-walker accounts: registration, lookup, update, removal and password login issuing a signed token.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
