//! Table metadata: lookup, provisioning and deletion.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use dataverse_core::error::ProvisioningError;
use dataverse_core::schema::{
    ENTITY_SELECT, EntityDefinition, ProvisioningState, TableDefinition, TableInfo, TableStatus,
};
use dataverse_core::traits::Method;
use dataverse_core::{ErrorKind, Result, SchemaName};

use crate::WebApiClient;
use crate::endpoints::*;

/// Tracks one table through its create lifecycle.
struct Provisioning<'a> {
    schema_name: &'a SchemaName,
    state: ProvisioningState,
}

impl<'a> Provisioning<'a> {
    fn new(schema_name: &'a SchemaName) -> Self {
        Self {
            schema_name,
            state: ProvisioningState::Absent,
        }
    }

    fn advance(&mut self, next: ProvisioningState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid provisioning transition {} -> {}",
            self.state,
            next
        );
        info!(table = %self.schema_name, from = %self.state, to = %next, "provisioning state changed");
        self.state = next;
    }

    fn fail<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(table = %self.schema_name, error = %err, "provisioning failed");
            self.advance(ProvisioningState::Failed);
        }
        result
    }
}

impl WebApiClient {
    /// Look up an entity definition by exact schema name.
    #[instrument(skip(self), fields(schema_name = %schema_name))]
    pub async fn find_entity(&self, schema_name: &SchemaName) -> Result<Option<EntityDefinition>> {
        let request = self
            .request(Method::Get, self.url(ENTITY_DEFINITIONS))
            .await?
            .query("$select", ENTITY_SELECT)
            .query("$filter", format!("SchemaName eq {}", schema_name.filter_literal()));

        let list: ODataList<EntityDefinition> = self.execute(request).await?.json()?;
        Ok(list.value.into_iter().next())
    }

    /// Whether a table is absent, still provisioning, or ready.
    pub async fn table_status(&self, table_name: &str) -> Result<TableStatus> {
        let schema_name = SchemaName::from_table_name(table_name)?;
        let entity = self.find_entity(&schema_name).await?;
        Ok(TableStatus::from_lookup(&schema_name, entity))
    }

    /// Describe a ready table; `None` if no such table exists.
    ///
    /// # Errors
    ///
    /// A table that exists but is still provisioning is reported as
    /// [`ErrorKind::NotReady`].
    pub async fn get_table_info(&self, table_name: &str) -> Result<Option<TableInfo>> {
        match self.table_status(table_name).await? {
            TableStatus::Absent => Ok(None),
            TableStatus::Ready(info) => Ok(Some(info)),
            TableStatus::Pending(entity) => Err(ProvisioningError::NotReady {
                schema_name: entity
                    .schema_name
                    .unwrap_or_else(|| table_name.to_string()),
            }
            .into()),
        }
    }

    /// All non-private tables.
    #[instrument(skip(self))]
    pub async fn list_tables(&self) -> Result<Vec<EntityDefinition>> {
        let request = self
            .request(Method::Get, self.url(ENTITY_DEFINITIONS))
            .await?
            .query("$filter", PUBLIC_TABLES_FILTER);

        let list: ODataList<EntityDefinition> = self.execute(request).await?.json()?;
        debug!(count = list.value.len(), "tables listed");
        Ok(list.value)
    }

    /// Create a table with the given `(column, type)` pairs and wait until
    /// it can be used.
    ///
    /// Column types are checked before any request. An existing table is
    /// never modified.
    #[instrument(skip(self, columns))]
    pub async fn create_table<I, N, T>(&self, table_name: &str, columns: I) -> Result<TableInfo>
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let definition = TableDefinition::new(table_name, columns, self.config().language_code)?;
        let schema_name = definition.schema_name();
        let mut provisioning = Provisioning::new(schema_name);

        if self.find_entity(schema_name).await?.is_some() {
            return Err(ProvisioningError::AlreadyExists {
                schema_name: schema_name.to_string(),
            }
            .into());
        }

        provisioning.advance(ProvisioningState::Creating);
        let payload = serde_json::to_value(definition.to_entity_metadata())?;
        let submitted = self.submit_entity(payload).await;
        provisioning.fail(submitted)?;

        provisioning.advance(ProvisioningState::PollingForReadiness);
        let ready = self.wait_for_ready(schema_name).await;
        let info = provisioning.fail(ready)?;

        provisioning.advance(ProvisioningState::Ready);
        Ok(info.with_columns(definition.columns_created()))
    }

    /// Delete a table by name.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::NotFound`] if the table has no resolvable
    /// metadata id.
    #[instrument(skip(self))]
    pub async fn delete_table(&self, table_name: &str) -> Result<()> {
        let schema_name = SchemaName::from_table_name(table_name)?;
        let metadata_id = self
            .find_entity(&schema_name)
            .await?
            .and_then(|entity| entity.metadata_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProvisioningError::NotFound {
                schema_name: schema_name.to_string(),
            })?;

        let url = self.url(&format!("{}({})", ENTITY_DEFINITIONS, metadata_id));
        let request = self.request(Method::Delete, url).await?;
        self.execute(request).await?;
        info!(table = %schema_name, %metadata_id, "table deleted");
        Ok(())
    }

    async fn poll_ready(&self, schema_name: &SchemaName) -> Result<TableInfo> {
        let entity = self.find_entity(schema_name).await?;
        match TableStatus::from_lookup(schema_name, entity) {
            TableStatus::Ready(info) => Ok(info),
            status => {
                debug!(table = %schema_name, absent = status.is_absent(), "table not ready");
                Err(ProvisioningError::NotReady {
                    schema_name: schema_name.to_string(),
                }
                .into())
            }
        }
    }

    async fn submit_entity(&self, payload: Value) -> Result<()> {
        let request = self
            .request(Method::Post, self.url(ENTITY_DEFINITIONS))
            .await?
            .json(payload);
        self.execute(request).await?;
        Ok(())
    }

    /// Poll the lookup with the readiness delays until both derived names
    /// resolve.
    async fn wait_for_ready(&self, schema_name: &SchemaName) -> Result<TableInfo> {
        let policy = self.config().readiness_policy();
        let attempts = policy.max_attempts();

        let polled = policy.run(|| self.poll_ready(schema_name)).await;

        polled.map_err(|err| {
            if err.kind() == ErrorKind::NotReady {
                ProvisioningError::ReadinessTimeout {
                    schema_name: schema_name.to_string(),
                    attempts,
                }
                .into()
            } else {
                err
            }
        })
    }
}
