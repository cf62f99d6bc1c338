use crate::models::route::Route;

/// Back stack of visited routes. The last entry is the visible screen;
/// the stack is never empty.
#[derive(Debug, Clone)]
pub struct NavStack {
    entries: Vec<Route>,
}

impl NavStack {
    pub fn new(root: Route) -> Self {
        Self {
            entries: vec![root],
        }
    }

    pub fn current(&self) -> &Route {
        // never empty: every mutation leaves at least one entry
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[Route] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    /// Pop history down to the newest entry named `name` (removing it too
    /// when `inclusive`), then push `route`. Unknown names pop nothing.
    pub fn push_popping_up_to(&mut self, route: Route, name: &str, inclusive: bool) {
        if let Some(pos) = self.entries.iter().rposition(|r| r.name() == name) {
            let keep = if inclusive { pos } else { pos + 1 };
            self.entries.truncate(keep);
        }
        self.entries.push(route);
    }

    /// Forget all history; `root` becomes the only entry.
    pub fn reset(&mut self, root: Route) {
        self.entries.clear();
        self.entries.push(root);
    }

    /// Swap the visible entry without growing the history.
    pub fn replace_top(&mut self, route: Route) {
        if let Some(top) = self.entries.last_mut() {
            *top = route;
        }
    }

    /// Go back one screen. Returns the newly visible route, or `None` at
    /// the root (nothing to go back to).
    pub fn pop(&mut self) -> Option<&Route> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }
}
