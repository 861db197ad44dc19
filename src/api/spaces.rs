use axum::response::Json;
use serde::{Deserialize, Serialize};
use spread_engine::{Channel, ChannelRole, ColorSpace};
use utoipa::ToSchema;

/// One channel of a searchable color space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelSchema {
    #[schema(example = "l")]
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// lightness, chroma, hue or other
    pub role: String,
    /// Whether the channel wraps around
    pub circular: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpaceSchema {
    #[schema(example = "oklch")]
    pub name: String,
    pub channels: Vec<ChannelSchema>,
}

fn role_name(role: ChannelRole) -> &'static str {
    match role {
        ChannelRole::Lightness => "lightness",
        ChannelRole::Chroma => "chroma",
        ChannelRole::Hue => "hue",
        ChannelRole::Other => "other",
    }
}

impl From<&Channel> for ChannelSchema {
    fn from(channel: &Channel) -> Self {
        Self {
            name: channel.name.to_string(),
            min: channel.min,
            max: channel.max,
            role: role_name(channel.role).to_string(),
            circular: channel.is_circular(),
        }
    }
}

impl From<ColorSpace> for SpaceSchema {
    fn from(space: ColorSpace) -> Self {
        Self {
            name: space.name().to_string(),
            channels: space.channels().iter().map(ChannelSchema::from).collect(),
        }
    }
}

/// List the color spaces the optimizer can search in
///
/// Channel order here is the order `widths` refers to.
#[utoipa::path(
    get,
    path = "/api/spaces",
    responses(
        (status = 200, description = "Channel layout and ranges per space", body = Vec<SpaceSchema>),
    ),
    tag = "Optimization"
)]
pub async fn handle_spaces() -> Json<Vec<SpaceSchema>> {
    Json(ColorSpace::ALL.into_iter().map(SpaceSchema::from).collect())
}
