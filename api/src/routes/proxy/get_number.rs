//! acchub acquisition routes

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use dg_core::domain::{ProviderId, ResponseEnvelope};
use dg_core::services::UpstreamClient;

use super::{dispatch_provision, AppState};
use crate::dto::{first_message, GetNumberForm};
use crate::handlers::{EnvelopeExt, ProxyForm};

/// Handler for POST /api/proxy/getNumber
///
/// Form fields (urlencoded or multipart): `country`, optional `carrier`, `authKey`. Answers with the
/// normalized `{full, plus, national}` triple when the provider reports
/// success, and with the provider's own payload otherwise.
pub async fn get_number<C: UpstreamClient + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<C>>,
    form: ProxyForm<GetNumberForm>,
) -> HttpResponse {
    acquire(&req, &state, form.into_inner(), ProviderId::AcchubNumber).await
}

/// Handler for POST /api/proxy/getNumberSms
///
/// Same form as `/getNumber`; the reply is always the number triple.
pub async fn get_number_sms<C: UpstreamClient + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<C>>,
    form: ProxyForm<GetNumberForm>,
) -> HttpResponse {
    acquire(&req, &state, form.into_inner(), ProviderId::AcchubSms).await
}

async fn acquire<C: UpstreamClient>(
    req: &HttpRequest,
    state: &AppState<C>,
    form: GetNumberForm,
    provider: ProviderId,
) -> HttpResponse {
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &GetNumberForm::FIELD_ORDER);
        tracing::debug!(%provider, %message, "rejecting form");
        return ResponseEnvelope::error(400, message).into_http_response();
    }

    dispatch_provision(req, state, form.into_request(provider)).await
}
