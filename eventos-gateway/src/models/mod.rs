pub mod certificado;
pub mod evento;
pub mod inscricao;
pub mod usuario;

pub use certificado::Certificado;
pub use evento::Evento;
pub use inscricao::{Checkin, Inscricao, InscricaoEnriquecida, StatusInscricao};
pub use usuario::{RapidoCheck, Usuario};
