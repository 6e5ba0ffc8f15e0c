use crate::select_server::haversine::Coordinates;
use crate::server_record::ServerRecord;

#[derive(Debug, Clone)]
pub struct Request {
    pub origin: Coordinates,
    pub candidates: Vec<ServerRecord>,
}
