use crate::server_record::ServerRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub server: ServerRecord,
    pub score: f64,
}
