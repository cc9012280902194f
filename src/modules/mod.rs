pub mod passeadores;

pub use self::passeadores::service::PasseadorService;
