//! Recording surface host for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::geometry::Bounds;
use crate::host::{SurfaceError, SurfaceHost, SurfaceOp, SurfaceResult};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create {
        label: String,
        url: String,
        bounds: Bounds,
    },
    Show(String),
    Hide(String),
    UpdateBounds(String, Bounds),
    Close(String),
    Navigate(String, String),
    Back(String),
    Forward(String),
    Reload(String),
}

impl HostCall {
    pub fn op(&self) -> SurfaceOp {
        match self {
            HostCall::Create { .. } => SurfaceOp::Create,
            HostCall::Show(_) => SurfaceOp::Show,
            HostCall::Hide(_) => SurfaceOp::Hide,
            HostCall::UpdateBounds(..) => SurfaceOp::UpdateBounds,
            HostCall::Close(_) => SurfaceOp::Close,
            HostCall::Navigate(..) => SurfaceOp::Navigate,
            HostCall::Back(_) => SurfaceOp::Back,
            HostCall::Forward(_) => SurfaceOp::Forward,
            HostCall::Reload(_) => SurfaceOp::Reload,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            HostCall::Create { label, .. } => label,
            HostCall::Show(label)
            | HostCall::Hide(label)
            | HostCall::UpdateBounds(label, _)
            | HostCall::Close(label)
            | HostCall::Navigate(label, _)
            | HostCall::Back(label)
            | HostCall::Forward(label)
            | HostCall::Reload(label) => label,
        }
    }
}

#[derive(Default)]
struct Recorder {
    calls: Vec<HostCall>,
    failing: HashSet<SurfaceOp>,
}

/// Records every call; operations marked failing are recorded and then
/// rejected
#[derive(Clone, Default)]
pub struct FakeHost {
    inner: Arc<Mutex<Recorder>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: SurfaceOp) {
        self.inner.lock().failing.insert(op);
    }

    pub fn recover(&self, op: SurfaceOp) {
        self.inner.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.inner.lock().calls.clone()
    }

    pub fn calls_for(&self, label: &str) -> Vec<HostCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.label() == label)
            .collect()
    }

    pub fn count(&self, op: SurfaceOp, label: &str) -> usize {
        self.calls_for(label)
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    pub fn clear(&self) {
        self.inner.lock().calls.clear();
    }

    fn record(&self, call: HostCall) -> SurfaceResult<()> {
        let mut inner = self.inner.lock();
        let op = call.op();
        let label = call.label().to_string();
        inner.calls.push(call);

        if inner.failing.contains(&op) {
            return Err(SurfaceError::command(op, &label, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl SurfaceHost for FakeHost {
    async fn create_surface(&self, label: &str, url: &str, bounds: Bounds) -> SurfaceResult<()> {
        self.record(HostCall::Create {
            label: label.to_string(),
            url: url.to_string(),
            bounds,
        })
    }

    async fn show_surface(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Show(label.to_string()))
    }

    async fn hide_surface(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Hide(label.to_string()))
    }

    async fn update_surface_bounds(&self, label: &str, bounds: Bounds) -> SurfaceResult<()> {
        self.record(HostCall::UpdateBounds(label.to_string(), bounds))
    }

    async fn close_surface(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Close(label.to_string()))
    }

    async fn navigate(&self, label: &str, url: &str) -> SurfaceResult<()> {
        self.record(HostCall::Navigate(label.to_string(), url.to_string()))
    }

    async fn navigate_back(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Back(label.to_string()))
    }

    async fn navigate_forward(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Forward(label.to_string()))
    }

    async fn reload(&self, label: &str) -> SurfaceResult<()> {
        self.record(HostCall::Reload(label.to_string()))
    }
}
