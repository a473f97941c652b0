/// Labels attached to every metric a request records.
#[derive(Debug, Clone, Default)]
pub struct TelemetryLabels {
    pub route: String,
    pub outcome: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl TelemetryLabels {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Default::default()
        }
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(2 + self.extra.len());
        tags.push(("route".into(), self.route.clone()));
        if let Some(outcome) = &self.outcome {
            tags.push(("outcome".into(), outcome.clone()));
        }
        for (key, value) in &self.extra {
            tags.push((key.clone(), value.clone()));
        }
        tags
    }
}
