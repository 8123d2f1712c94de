//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";
pub const POST_API_REGISTER: &str = "/api/register";
pub const POST_API_TOKEN: &str = "/api/token";
pub const POST_API_TOKEN_REFRESH: &str = "/api/token/refresh";
pub const API_PROFILE: &str = "/api/profile";
