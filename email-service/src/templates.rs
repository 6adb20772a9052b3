use serde_json::Value;

/// The closed set of email templates the relay can render.
///
/// Template names arrive as strings on the wire; unknown names are rejected
/// at the boundary. Fields missing from `data` render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Inscricao { nome: String, evento: String },
    Cancelamento { evento: String },
    Checkin { evento: String },
}

impl Template {
    /// Map a wire-level template name plus its data payload onto a variant.
    pub fn resolve(name: &str, data: &Value) -> Option<Template> {
        let field = |key: &str| {
            data.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        match name {
            "inscricao" => Some(Template::Inscricao {
                nome: field("nome"),
                evento: field("evento"),
            }),
            "cancelamento" => Some(Template::Cancelamento {
                evento: field("evento"),
            }),
            "checkin" => Some(Template::Checkin {
                evento: field("evento"),
            }),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Template::Inscricao { nome, evento } => format!(
                "<h1>Inscrição confirmada</h1>\n\
                 <p>Olá {}, sua inscrição no evento <b>{}</b> foi confirmada!</p>",
                nome, evento
            ),
            Template::Cancelamento { evento } => format!(
                "<h1>Inscrição cancelada</h1>\n\
                 <p>Sua inscrição no evento <b>{}</b> foi cancelada.</p>",
                evento
            ),
            Template::Checkin { evento } => format!(
                "<h1>Presença registrada</h1>\n\
                 <p>Você registrou presença no evento <b>{}</b>.</p>",
                evento
            ),
        }
    }
}
