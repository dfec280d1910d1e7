// ABOUTME: Process-wide lazily initialised model gateway handle
// ABOUTME: Builds the gateway on first use, reuses it afterwards, and retries when initialisation fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use super::ModelGateway;
use coach_core::constants::messages;
use coach_core::errors::{AppError, AppResult};

/// Factory invoked until it first succeeds
pub type GatewayFactory = Arc<dyn Fn() -> AppResult<ModelGateway> + Send + Sync>;

/// Memoised gateway shared by every request
///
/// Only a successful initialisation is stored; failures are returned to the
/// caller and the next `acquire` runs the factory again.
pub struct GatewaySlot {
    cell: OnceCell<Arc<ModelGateway>>,
    factory: GatewayFactory,
}

impl GatewaySlot {
    /// Slot that builds its gateway on first use
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> AppResult<ModelGateway> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Arc::new(factory),
        }
    }

    /// Slot holding an already built gateway
    #[must_use]
    pub fn ready(gateway: ModelGateway) -> Self {
        Self {
            cell: OnceCell::from(Arc::new(gateway)),
            factory: Arc::new(|| Err(AppError::internal("gateway slot was created initialised"))),
        }
    }

    /// Shared gateway, initialising it if needed
    ///
    /// # Errors
    ///
    /// Returns the factory error prefixed with "Gemini chưa được cấu hình: ",
    /// keeping its error code.
    pub async fn acquire(&self) -> AppResult<Arc<ModelGateway>> {
        self.cell
            .get_or_try_init(|| async {
                let gateway = (self.factory)()?;
                info!(models = ?gateway.model_names(), "Model gateway initialised");
                Ok::<_, AppError>(Arc::new(gateway))
            })
            .await
            .cloned()
            .map_err(|err| {
                error!(error = %err, "Model gateway initialisation failed");
                err.with_prefix(messages::GATEWAY_NOT_CONFIGURED_PREFIX)
            })
    }

    /// Whether a gateway has been built
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl Debug for GatewaySlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GatewaySlot")
            .field("gateway", &self.cell.get())
            .finish_non_exhaustive()
    }
}
