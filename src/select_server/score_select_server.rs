use crate::select_server::{
    error::Error,
    haversine::{Coordinates, distance_km},
    request::Request,
    response::Response,
    select_server::SelectServer,
};
use crate::server_record::ServerRecord;

/// Penalty used in place of a ping that was never measured.
pub const UNMEASURED_PING_PENALTY: f64 = 50.0;

/// Picks the candidate with the lowest `distance_km + ping + load%`.
///
/// The three terms are summed as-is, kilometers next to milliseconds next to
/// percentage points. Ties go to the earliest candidate.
#[derive(Clone, Default)]
pub struct ScoreSelectServer {}

impl ScoreSelectServer {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn ping_penalty(server: &ServerRecord) -> f64 {
    server
        .ping_ms
        .map(f64::from)
        .unwrap_or(UNMEASURED_PING_PENALTY)
}

pub fn load_penalty(server: &ServerRecord) -> f64 {
    f64::from(server.current_users) / f64::from(server.max_users) * 100.0
}

/// `None` when the server has no coordinates.
pub fn score(origin: Coordinates, server: &ServerRecord) -> Option<f64> {
    let location = server.coordinates()?;

    Some(distance_km(origin, location) + ping_penalty(server) + load_penalty(server))
}

impl SelectServer for ScoreSelectServer {
    fn execute(&self, request: Request) -> Result<Response, Error> {
        let mut best: Option<Response> = None;

        for server in request.candidates {
            if !server.is_selectable() {
                continue;
            }

            let Some(score) = score(request.origin, &server).filter(|score| score.is_finite())
            else {
                continue;
            };

            if best.as_ref().is_none_or(|current| score < current.score) {
                best = Some(Response { server, score });
            }
        }

        best.ok_or(Error::NoServersAvailable)
    }
}
