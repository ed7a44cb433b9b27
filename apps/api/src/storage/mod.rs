// Two-tier persistence: remote PostgreSQL table with a local JSON log as the
// fallback. Callers use gateway::PersistenceGateway only.

pub mod fallback;
pub mod gateway;
pub mod remote;
