use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::resolver::ResolutionResult;

/// Round a monetary or distance amount to two decimals, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a fee for display, e.g. `€3.50`, `$5.00`, `12.00 CHF`.
pub fn format_fee(amount: f64, currency: &str) -> String {
    let rounded = round_to_cents(amount);
    match currency.to_ascii_uppercase().as_str() {
        "EUR" => format!("€{rounded:.2}"),
        "USD" => format!("${rounded:.2}"),
        "GBP" => format!("£{rounded:.2}"),
        other => format!("{rounded:.2} {other}"),
    }
}

/// Display-ready delivery quote. All rounding happens here, never in the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    pub zone_id: String,
    pub zone_name: String,
    pub delivery_fee: f64,
    pub formatted_fee: String,
    pub currency: String,
    pub estimated_time: String,
    pub distance_km: f64,
}

impl DeliveryQuote {
    /// Build a quote from a matched resolution. Returns `None` when out of range.
    pub fn from_resolution(result: &ResolutionResult, currency: &str) -> Option<Self> {
        let ResolutionResult::Matched { zone, distance_km } = result else {
            return None;
        };
        let currency = currency.to_ascii_uppercase();
        Some(Self {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            delivery_fee: round_to_cents(zone.delivery_fee),
            formatted_fee: format_fee(zone.delivery_fee, &currency),
            currency,
            estimated_time: zone.estimated_time.clone(),
            distance_km: round_to_cents(*distance_km),
        })
    }
}

/// Presentation style for turning a [`ResolutionSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRenderMode {
    PlainText,
    RichText,
    Note,
}

/// Structured view of one resolution that the CLI and services serialise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionSummary {
    pub customer: GeoPoint,
    pub restaurant: GeoPoint,
    #[serde(flatten)]
    pub result: ResolutionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<DeliveryQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ResolutionSummary {
    pub fn new(
        customer: GeoPoint,
        restaurant: GeoPoint,
        result: ResolutionResult,
        currency: &str,
    ) -> Self {
        let quote = DeliveryQuote::from_resolution(&result, currency);
        Self {
            customer,
            restaurant,
            result,
            quote,
            address: None,
        }
    }

    /// Attach the free-text address the customer point was geocoded from.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: ResolutionRenderMode) -> String {
        match mode {
            ResolutionRenderMode::PlainText => self.render_plain(),
            ResolutionRenderMode::RichText => self.render_rich(),
            ResolutionRenderMode::Note => self.render_note(),
        }
    }

    fn customer_label(&self) -> String {
        match &self.address {
            Some(address) => format!("{address} {}", self.customer),
            None => self.customer.to_string(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let distance = round_to_cents(self.result.distance_km());
        match (&self.result, &self.quote) {
            (ResolutionResult::Matched { .. }, Some(quote)) => {
                let _ = writeln!(
                    buffer,
                    "Delivery to {}: zone {} ({})",
                    self.customer_label(),
                    quote.zone_name,
                    quote.zone_id
                );
                let _ = writeln!(buffer, "  distance: {distance:.2} km");
                let _ = writeln!(buffer, "  fee: {}", quote.formatted_fee);
                if !quote.estimated_time.is_empty() {
                    let _ = writeln!(buffer, "  estimated time: {}", quote.estimated_time);
                }
            }
            (
                ResolutionResult::OutOfRange {
                    max_configured_distance,
                    ..
                },
                _,
            ) => {
                let _ = writeln!(
                    buffer,
                    "Delivery to {}: out of range",
                    self.customer_label()
                );
                let _ = writeln!(buffer, "  distance: {distance:.2} km");
                let _ = writeln!(
                    buffer,
                    "  furthest delivery: {:.2} km",
                    round_to_cents(*max_configured_distance)
                );
            }
            (ResolutionResult::Matched { zone, .. }, None) => {
                let _ = writeln!(
                    buffer,
                    "Delivery to {}: zone {} ({})",
                    self.customer_label(),
                    zone.name,
                    zone.id
                );
                let _ = writeln!(buffer, "  distance: {distance:.2} km");
            }
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let distance = round_to_cents(self.result.distance_km());
        match &self.quote {
            Some(quote) => {
                let _ = writeln!(
                    buffer,
                    "**{}** (`{}`) at _{distance:.2} km_",
                    quote.zone_name, quote.zone_id
                );
                let _ = writeln!(buffer, "* Fee: **{}**", quote.formatted_fee);
                if !quote.estimated_time.is_empty() {
                    let _ = writeln!(buffer, "* ETA: {}", quote.estimated_time);
                }
            }
            None => {
                let _ = writeln!(buffer, "**Out of range** at _{distance:.2} km_");
                if let ResolutionResult::OutOfRange {
                    max_configured_distance,
                    ..
                } = &self.result
                {
                    let _ = writeln!(
                        buffer,
                        "* Furthest delivery: {:.2} km",
                        round_to_cents(*max_configured_distance)
                    );
                }
            }
        }
        buffer
    }

    fn render_note(&self) -> String {
        match &self.quote {
            Some(quote) if quote.estimated_time.is_empty() => {
                format!("{} {}\n", quote.zone_name, quote.formatted_fee)
            }
            Some(quote) => format!(
                "{} {} {}\n",
                quote.zone_name, quote.formatted_fee, quote.estimated_time
            ),
            None => "Out of range\n".to_string(),
        }
    }
}
