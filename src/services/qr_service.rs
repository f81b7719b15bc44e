// src/services/qr_service.rs
use crate::error::{AppError, AppResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::{render::svg, QrCode};

/// Text encoded in a student's QR code.
pub fn qr_payload(cms_id: i64, name: &str, room_no: &str, hostel_name: &str) -> String {
    format!("CMS:{cms_id}, Name:{name}, Room:{room_no}, Hostel:{hostel_name}")
}

/// Renders `data` as an SVG QR code wrapped in a base64 data URL.
pub fn generate_data_url(data: &str) -> AppResult<String> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| {
        tracing::error!("QR encoding failed for '{}': {}", data, e);
        AppError::QrCodeError(e.to_string())
    })?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}
