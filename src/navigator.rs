use mockall::automock;
use tracing::info;

/// Route transitions requested by the workflow. The real shell swaps the
/// screen; anything else (tests, the demo binary) records them.
#[automock]
pub trait Navigator {
    fn navigate(&mut self, route: &str) -> Result<(), String>;
}

/// Production stand-in used by the demo binary: logs and remembers every
/// transition.
pub struct RouteLog {
    pub visited: Vec<String>,
}

impl RouteLog {
    pub fn new() -> RouteLog {
        RouteLog {
            visited: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.visited.last().map(|route| route.as_str())
    }
}

impl Default for RouteLog {
    fn default() -> RouteLog {
        RouteLog::new()
    }
}

impl Navigator for RouteLog {
    fn navigate(&mut self, route: &str) -> Result<(), String> {
        info!("Navigating to {}", route);
        self.visited.push(route.to_string());
        Ok(())
    }
}
