//! Process-wide settings of the job flow registry.
//!
//! A [`Configuration`] is created once per process (or per test) and shared with the
//! registry through an `Arc`. Every field has a default, so `Configuration::default()`
//! and an empty serde document are both usable as-is.
mod credentials;
pub use credentials::Credentials;

mod epoch;
pub use epoch::Epoch;

use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use flowkeep_model::{
    DEFAULT_AMI_VERSION, InstanceGroupConfig, InstancesConfig, JobFlowConfig, JobType, KeyValue,
    NAME_KEY_TYPE, NAME_NAME_SEPARATOR, SizingPreset,
};

use crate::{error::CoreResult, provider::JobFlowApi};

/// Prefix shared by the names of every managed job flow.
pub const DEFAULT_NAME_PREFIX: &str = "Managed process";

/// Run name used when none is configured.
pub const DEFAULT_NAME: &str = "Main process";

/// Default number of on-demand workers of the production plan.
pub const DEFAULT_MAX_INSTANCES: u32 = 20;

/// How far back listing looks when no epoch is configured.
pub const DEFAULT_EPOCH_LOOKBACK: Duration = Duration::weeks(1);

/// Naming, listing and sizing settings plus the provider client handle.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Marks a job flow as managed. Change it only to separate whole deployments;
    /// use [`Configuration::name`] to set one run apart from another.
    pub name_prefix: String,
    /// Run name following the prefix.
    pub name: String,
    /// Maximum on-demand workers of the production plan; spot workers are twice that.
    pub max_instances: u32,
    /// Instance-group plan used on start.
    pub sizing: SizingPreset,
    pub credentials: Credentials,
    /// EC2 key pair name for SSH access to the lead node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// Local path of the private key matching [`Configuration::key_name`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<PathBuf>,
    /// S3 location receiving cluster logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_uri: Option<String>,
    pub ami_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    epoch: Option<Epoch>,
    #[serde(skip)]
    default_epoch: OnceLock<OffsetDateTime>,

    #[serde(skip)]
    client: OnceLock<Arc<dyn JobFlowApi>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            name: DEFAULT_NAME.to_string(),
            max_instances: DEFAULT_MAX_INSTANCES,
            sizing: SizingPreset::default(),
            credentials: Credentials::default(),
            key_name: None,
            key_path: None,
            log_uri: None,
            ami_version: DEFAULT_AMI_VERSION.to_string(),
            epoch: None,
            default_epoch: OnceLock::new(),
            client: OnceLock::new(),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_epoch(mut self, epoch: impl Into<Epoch>) -> Self {
        self.set_epoch(epoch);
        self
    }

    pub fn with_max_instances(mut self, max_instances: u32) -> Self {
        self.max_instances = max_instances;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingPreset) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    pub fn with_log_uri(mut self, log_uri: impl Into<String>) -> Self {
        self.log_uri = Some(log_uri.into());
        self
    }

    /// Display name: `"{prefix} : {name}"`, followed by a space and the suffix pairs
    /// rendered as `k => v` and joined by `", "`, in the given order.
    pub fn full_name(&self, suffix: &[KeyValue]) -> String {
        let mut out = format!("{}{}{}", self.name_prefix, NAME_NAME_SEPARATOR, self.name);
        if !suffix.is_empty() {
            let pairs: Vec<String> = suffix.iter().map(ToString::to_string).collect();
            out.push(' ');
            out.push_str(&pairs.join(", "));
        }
        out
    }

    /// Display name of the managed job flow of type `job_type`.
    ///
    /// Two job flows of the same type under the same configuration share this name,
    /// which is what the registry de-duplicates on.
    pub fn full_name_for(&self, job_type: JobType) -> String {
        self.full_name(&[KeyValue::new(NAME_KEY_TYPE, job_type.as_str())])
    }

    /// Store the epoch as given. It is only validated when read.
    pub fn set_epoch(&mut self, epoch: impl Into<Epoch>) {
        self.epoch = Some(epoch.into());
        self.default_epoch.take();
    }

    /// Epoch as an ISO-8601 string.
    ///
    /// Unset means one week before the first read; later reads return that same instant.
    pub fn epoch(&self) -> CoreResult<String> {
        match &self.epoch {
            Some(epoch) => epoch.to_iso8601(),
            None => {
                let at = *self
                    .default_epoch
                    .get_or_init(|| OffsetDateTime::now_utc() - DEFAULT_EPOCH_LOOKBACK);
                Epoch::At(at).to_iso8601()
            }
        }
    }

    /// Instance groups of the configured sizing preset.
    pub fn instance_groups(&self) -> Vec<InstanceGroupConfig> {
        self.sizing.instance_groups(self.max_instances)
    }

    /// Complete creation request body (everything except the name).
    ///
    /// Job flows are kept alive when idle so interactive work can be added later, and
    /// are created without termination protection so `kill_all` can reclaim them.
    pub fn job_flow_config(&self) -> JobFlowConfig {
        JobFlowConfig {
            ami_version: self.ami_version.clone(),
            log_uri: self.log_uri.clone(),
            instances: InstancesConfig {
                ec2_key_name: self.key_name.clone(),
                instance_groups: self.instance_groups(),
                keep_job_flow_alive_when_no_steps: true,
                termination_protected: false,
            },
        }
    }

    /// Provider client built from the stored credentials on first use, then cached.
    pub fn client_with<F>(&self, connect: F) -> Arc<dyn JobFlowApi>
    where
        F: FnOnce(&Credentials) -> Arc<dyn JobFlowApi>,
    {
        Arc::clone(self.client.get_or_init(|| connect(&self.credentials)))
    }

    /// Drop the cached client, e.g. after rotating credentials.
    pub fn reset_client(&mut self) {
        self.client.take();
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("name_prefix", &self.name_prefix)
            .field("name", &self.name)
            .field("epoch", &self.epoch)
            .field("max_instances", &self.max_instances)
            .field("sizing", &self.sizing)
            .field("credentials", &self.credentials)
            .field("key_name", &self.key_name)
            .field("log_uri", &self.log_uri)
            .field("ami_version", &self.ami_version)
            .field("client", &self.client.get().map(|_| "<connected>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{error::CoreError, provider::InMemoryJobFlows};
    use flowkeep_model::{Market, parse_iso8601};
    use time::macros::date;

    #[test]
    fn defaults() {
        let config = Configuration::default();

        assert_eq!(config.name_prefix, "Managed process");
        assert_eq!(config.name, "Main process");
        assert_eq!(config.max_instances, 20);
        assert_eq!(config.sizing, SizingPreset::Test);
        assert_eq!(config.ami_version, "2.0");
        assert!(config.credentials.access_key_id.is_none());
    }

    #[test]
    fn full_name_without_suffix() {
        let config = Configuration::new().with_name_prefix("P").with_name("N");
        assert_eq!(config.full_name(&[]), "P : N");
    }

    #[test]
    fn full_name_with_suffix_pairs_in_order() {
        let config = Configuration::new().with_name("Bob's one off");

        assert_eq!(
            config.full_name(&[KeyValue::new("arg1", "bob")]),
            "Managed process : Bob's one off arg1 => bob"
        );
        assert_eq!(
            config.full_name(&[KeyValue::new("b", "2"), KeyValue::new("a", "1")]),
            "Managed process : Bob's one off b => 2, a => 1"
        );
    }

    #[test]
    fn full_name_for_embeds_type() {
        let config = Configuration::default();
        assert_eq!(
            config.full_name_for(JobType::Hive),
            "Managed process : Main process type => hive"
        );
    }

    #[test]
    fn epoch_defaults_to_one_week_ago() {
        let config = Configuration::default();
        let epoch = parse_iso8601(&config.epoch().unwrap()).unwrap();
        let age = OffsetDateTime::now_utc() - epoch;

        assert!(age >= Duration::weeks(1) - Duration::minutes(1));
        assert!(age <= Duration::weeks(1) + Duration::minutes(1));
    }

    #[test]
    fn default_epoch_is_fixed_on_first_read() {
        let mut config = Configuration::new();
        let first = config.epoch().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert_eq!(config.epoch().unwrap(), first);

        config.set_epoch(date!(2012 - 01 - 05));
        assert_eq!(config.epoch().unwrap(), "2012-01-05");
        assert!(config.default_epoch.get().is_none());
    }

    #[test]
    fn epoch_date_is_returned_in_date_format() {
        let config = Configuration::new().with_epoch(date!(2012 - 01 - 05));
        assert_eq!(config.epoch().unwrap(), "2012-01-05");
    }

    #[test]
    fn epoch_is_stored_as_is_until_read() {
        let mut config = Configuration::default();
        config.set_epoch("not a time");

        assert!(matches!(config.epoch(), Err(CoreError::InvalidEpoch(_))));

        config.set_epoch(1_325_759_415_i64);
        assert_eq!(config.epoch().unwrap(), "2012-01-05T10:30:15Z");
    }

    #[test]
    fn test_sizing_has_two_groups() {
        let config = Configuration::default();
        assert_eq!(config.instance_groups().len(), 2);
    }

    #[test]
    fn production_sizing_has_three_groups() {
        let config = Configuration::new()
            .with_sizing(SizingPreset::Production)
            .with_max_instances(7);
        let groups = config.instance_groups();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].instance_count, 14);
        assert_eq!(groups[2].market, Market::Spot);
    }

    #[test]
    fn job_flow_config_carries_settings() {
        let config = Configuration::new()
            .with_key_name("ops")
            .with_log_uri("s3://logs/emr/");
        let body = config.job_flow_config();

        assert_eq!(body.ami_version, "2.0");
        assert_eq!(body.log_uri.as_deref(), Some("s3://logs/emr/"));
        assert_eq!(body.instances.ec2_key_name.as_deref(), Some("ops"));
        assert!(body.instances.keep_job_flow_alive_when_no_steps);
        assert!(!body.instances.termination_protected);
        assert_eq!(body.instances.instance_groups, config.instance_groups());
    }

    #[test]
    fn client_is_built_once_from_credentials() {
        let built = AtomicUsize::new(0);
        let mut config =
            Configuration::new().with_credentials(Credentials::new("accesskey", "secretkey"));

        let connect = |creds: &Credentials| -> Arc<dyn JobFlowApi> {
            assert_eq!(creds.access_key_id.as_deref(), Some("accesskey"));
            built.fetch_add(1, Ordering::SeqCst);
            Arc::new(InMemoryJobFlows::new())
        };

        let a = config.client_with(connect);
        let b = config.client_with(connect);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(built.load(Ordering::SeqCst), 1);

        config.reset_client();
        let _c = config.client_with(connect);
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let json = r#"{"name": "nightly", "sizing": "production", "epoch": "2012-01-05"}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();

        assert_eq!(config.name, "nightly");
        assert_eq!(config.name_prefix, DEFAULT_NAME_PREFIX);
        assert_eq!(config.sizing, SizingPreset::Production);
        assert_eq!(config.epoch().unwrap(), "2012-01-05T00:00:00Z");
    }

    #[test]
    fn serde_writes_epoch_as_iso8601() {
        let config = Configuration::new().with_epoch(date!(2012 - 01 - 05));
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["epoch"], "2012-01-05");
        assert!(json.get("client").is_none());
    }
}
