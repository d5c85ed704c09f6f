// Client domain model
use serde::Deserialize;

/// A monitored tenant that can be picked in the selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Client {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Text shown in the selector; falls back to the name when no description is configured.
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// Body of `GET /api/clients`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientRegistry {
    #[serde(default, deserialize_with = "crate::domain::stats::nullable")]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub default_client: Option<String>,
}

impl ClientRegistry {
    #[cfg(test)]
    pub fn new(clients: Vec<Client>, default_client: Option<String>) -> Self {
        Self {
            clients,
            default_client,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// The client selected on load: the designated default if it is known, else the first one.
    pub fn initial_client(&self) -> Option<&Client> {
        self.default_client
            .as_deref()
            .and_then(|name| self.clients.iter().find(|c| c.name == name))
            .or_else(|| self.clients.first())
    }

    /// The designated default when it names no configured client.
    pub fn unknown_default(&self) -> Option<&str> {
        self.default_client
            .as_deref()
            .filter(|name| !self.clients.iter().any(|c| c.name == *name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_client_prefers_default() {
        let registry = ClientRegistry::new(
            vec![Client::new("lab", "Lab"), Client::new("prod", "Production")],
            Some("prod".to_string()),
        );
        assert_eq!(registry.initial_client().unwrap().name, "prod");
        assert_eq!(registry.unknown_default(), None);
    }

    #[test]
    fn test_initial_client_falls_back_to_first() {
        let registry = ClientRegistry::new(
            vec![Client::new("lab", "Lab"), Client::new("prod", "Production")],
            Some("missing".to_string()),
        );
        assert_eq!(registry.initial_client().unwrap().name, "lab");
        assert_eq!(registry.unknown_default(), Some("missing"));

        let registry = ClientRegistry::new(vec![Client::new("lab", "")], None);
        assert_eq!(registry.initial_client().unwrap().label(), "lab");
    }

    #[test]
    fn test_parse_registry_with_null_clients() {
        let registry: ClientRegistry =
            serde_json::from_str(r#"{"clients": null, "default_client": null}"#).unwrap();
        assert!(registry.is_empty());
        assert!(registry.initial_client().is_none());
    }
}
