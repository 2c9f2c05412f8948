use crate::dto::HealthRes;
use std::fmt::Display;

/// Turns the outcome of a database ping into the health payload.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn report<E: Display>(database: Result<(), E>) -> HealthRes {
        match database {
            Ok(()) => HealthRes {
                ok: true,
                message: "Odontogram service is alive".into(),
            },
            Err(e) => HealthRes {
                ok: false,
                message: format!("database unavailable: {e}"),
            },
        }
    }
}
