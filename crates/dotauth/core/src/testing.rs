// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Test helpers for asserting on emitted audit events

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One captured log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLine {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// `tracing` layer that records every event it sees.
///
/// Install it for the current thread with [`AuditCapture::install`]; the
/// returned guard restores the previous subscriber on drop.
#[derive(Clone, Default)]
pub struct AuditCapture {
    lines: Arc<Mutex<Vec<AuditLine>>>,
}

impl AuditCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn lines(&self) -> Vec<AuditLine> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Events whose target starts with `prefix`, e.g. `dotauth_core::service`
    pub fn lines_from(&self, prefix: &str) -> Vec<AuditLine> {
        self.lines().into_iter().filter(|line| line.target.starts_with(prefix)).collect()
    }

    pub fn messages_from(&self, prefix: &str) -> Vec<(Level, String)> {
        self.lines_from(prefix).into_iter().map(|line| (line.level, line.message)).collect()
    }
}

impl<S: Subscriber> Layer<S> for AuditCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        let line = AuditLine {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.fields.remove("message").unwrap_or_default(),
            fields: visitor.fields,
        };
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push(line);
    }
}

#[derive(Default)]
struct FieldCollector {
    fields: BTreeMap<String, String>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields.insert(field.name().to_string(), format!("{:?}", value));
    }
}
