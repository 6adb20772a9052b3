//! Fan-out enrichment of a user's registrations.
//!
//! For each registration the event, check-in state and certificate are
//! fetched concurrently from their own services. There is no transaction
//! here: any individual fetch failure degrades that field to a safe default
//! instead of failing the page.

use crate::models::{Inscricao, InscricaoEnriquecida};
use crate::AppState;
use chrono::{DateTime, Utc};
use futures::future::join_all;

pub async fn enriquecer_inscricoes(
    state: &AppState,
    inscricoes: Vec<Inscricao>,
) -> Vec<InscricaoEnriquecida> {
    join_all(
        inscricoes
            .into_iter()
            .map(|inscricao| enriquecer(state, inscricao)),
    )
    .await
}

async fn enriquecer(state: &AppState, inscricao: Inscricao) -> InscricaoEnriquecida {
    let (evento, checkin, certificado) = tokio::join!(
        state.eventos.get(&inscricao.evento_id),
        state.checkins.by_inscricao(&inscricao.id),
        state.certificados.by_inscricao(&inscricao.id, &inscricao.evento_id),
    );

    if let Err(err) = &evento {
        tracing::warn!(evento_id = %inscricao.evento_id, error = %err, "event lookup failed");
    }

    InscricaoEnriquecida {
        evento: evento.ok(),
        tem_checkin: checkin.map(|c| c.tem_checkin).unwrap_or(false),
        // A revoked certificate must never be presented as existing.
        certificado: certificado.ok().filter(|c| !c.revogado),
        inscricao,
    }
}

/// Sort registrations for display: upcoming events first, then within each
/// group by descending start time. Registrations without a resolvable event
/// sink to the bottom.
pub fn ordenar_por_inicio(itens: &mut [InscricaoEnriquecida], agora: DateTime<Utc>) {
    itens.sort_by(|a, b| {
        let (inicio_a, inicio_b) = (a.inicio_em(), b.inicio_em());
        let (futuro_a, futuro_b) = (inicio_a > agora, inicio_b > agora);
        futuro_b.cmp(&futuro_a).then_with(|| inicio_b.cmp(&inicio_a))
    });
}
