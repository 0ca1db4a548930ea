// src/services/scheduling.rs
// Regra de conflito de agenda: cada agendamento ocupa 2 horas a partir de `data_hora`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::AgendamentoStore,
};

pub fn appointment_duration() -> Duration {
    Duration::hours(2)
}

/// Janela `(after, before)` (aberta nas duas pontas) onde o início de outro agendamento
/// do mesmo cliente sobrepõe `[data_hora, data_hora + 2h)`.
pub fn conflict_window(data_hora: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let duration = appointment_duration();
    (data_hora - duration, data_hora + duration)
}

pub fn ensure_not_in_past(data_hora: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
    if data_hora < now {
        return Err(AppError::BadRequest(messages::PAST_APPOINTMENT.into()));
    }
    Ok(())
}

/// Valida `(client_id, data_hora)` antes de inserir ou remarcar.
/// Na remarcação, `exclude_id` tira o próprio registro da busca.
pub async fn check_slot(
    store: &dyn AgendamentoStore,
    client_id: Uuid,
    data_hora: DateTime<Utc>,
    exclude_id: Option<Uuid>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    ensure_not_in_past(data_hora, now)?;

    let (after, before) = conflict_window(data_hora);
    let conflicts = store
        .find_conflicting(client_id, after, before, exclude_id)
        .await?;

    if !conflicts.is_empty() {
        tracing::debug!(
            "Agendamento em conflito para o cliente {} em {}: {} registro(s)",
            client_id,
            data_hora,
            conflicts.len()
        );
        return Err(AppError::Conflict(messages::AGENDAMENTO_EXISTS.into()));
    }

    Ok(())
}
