pub mod certificados;
pub mod inscricoes;
pub mod pages;
pub mod session;
pub mod usuarios;
