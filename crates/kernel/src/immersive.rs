use serde::{Deserialize, Serialize};

/// Outcome of the host's asynchronous immersive-capability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmersiveSupport {
    ImmersiveVr,
    ImmersiveAr,
    /// Only non-immersive (inline) sessions are available.
    InlineOnly,
    /// The runtime has no immersive API at all.
    Unavailable,
    /// The capability query itself failed.
    QueryFailed(String),
}

impl ImmersiveSupport {
    pub fn is_immersive(&self) -> bool {
        matches!(self, Self::ImmersiveVr | Self::ImmersiveAr)
    }

    /// User-facing note for the degraded cases.
    pub fn advisory(&self) -> Option<String> {
        match self {
            Self::ImmersiveVr | Self::ImmersiveAr => None,
            Self::InlineOnly => Some("Immersive mode not supported, playing in flat mode".into()),
            Self::Unavailable => Some("WebXR not available".into()),
            Self::QueryFailed(reason) => Some(format!("Could not check VR support: {reason}")),
        }
    }
}

/// Markers that identify a mobile browser in a user-agent string.
const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// What the host reports about the device, shown once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub mobile: bool,
    pub webxr: bool,
}

impl DeviceInfo {
    pub fn from_user_agent(user_agent: &str, webxr: bool) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        Self {
            mobile: MOBILE_MARKERS.iter().any(|m| ua.contains(m)),
            webxr,
        }
    }
}

impl std::fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        write!(f, "Mobile: {} | WebXR: {}", yes_no(self.mobile), yes_no(self.webxr))
    }
}
