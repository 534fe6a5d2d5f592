//! Mirrored reference entities. Identifiers are assigned by the remote
//! system; the local side never invents them, it only overwrites by id.

#[derive(Debug, Clone)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
}
