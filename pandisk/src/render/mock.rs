use std::sync::Mutex;

use super::{Footprint, RenderArtifact, RenderBackend};
use crate::error::{SceneError, SceneResult};

/// Backend that records what it was asked to draw.
#[derive(Debug)]
pub struct MockBackend {
    available: bool,
    renders: Mutex<Vec<Vec<Footprint>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            available: true,
            renders: Mutex::new(Vec::new()),
        }
    }

    /// Backend whose probe always fails
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Footprints of every render call so far, oldest first
    pub fn renders(&self) -> Vec<Vec<Footprint>> {
        self.renders
            .lock()
            .map(|renders| renders.clone())
            .unwrap_or_default()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn probe(&self) -> SceneResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(SceneError::BackendUnavailable(
                "mock backend configured as unavailable".to_string(),
            ))
        }
    }

    fn render(&self, footprints: &[Footprint]) -> SceneResult<RenderArtifact> {
        let mut renders = self
            .renders
            .lock()
            .map_err(|_| SceneError::Render("mock backend lock poisoned".to_string()))?;
        renders.push(footprints.to_vec());
        Ok(RenderArtifact::Text(format!(
            "{} footprints",
            footprints.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FootprintKind;

    #[test]
    fn test_records_renders() {
        let backend = MockBackend::new();
        let star = Footprint {
            kind: FootprintKind::Star { magnitude: 4.0 },
            x: 0.0,
            y: 0.0,
            major: 0.0,
            minor: 0.0,
            orientation_deg: 0.0,
            flux_mjy: 0.0,
        };

        assert!(backend.probe().is_ok());
        let artifact = backend.render(&[star]).unwrap();
        assert_eq!(artifact, RenderArtifact::Text("1 footprints".to_string()));
        backend.render(&[]).unwrap();

        let renders = backend.renders();
        assert_eq!(renders.len(), 2);
        assert_eq!(renders[0], vec![star]);
        assert!(renders[1].is_empty());
    }

    #[test]
    fn test_unavailable_probe() {
        assert!(matches!(
            MockBackend::unavailable().probe(),
            Err(SceneError::BackendUnavailable(_))
        ));
    }
}
