//! Caller-facing remote operations.
//!
//! One method per remote operation, each a pass-through over the signed
//! session: arguments go out positionally, results come back as raw
//! [`serde_json::Value`] (mapping results onto domain types is up to the
//! caller).

use error_stack::Report;
use serde_json::Value;

use crate::error::ApiError;
use crate::params::ParamValue;
use crate::session::{Connector, SessionClient};
use crate::settings::Settings;

/// When a cancellation takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationTime {
    /// At the end of the current contract period.
    End,
    /// Immediately.
    Immediately,
}

impl CancellationTime {
    pub fn as_str(self) -> &'static str {
        match self {
            CancellationTime::End => "end",
            CancellationTime::Immediately => "immediately",
        }
    }
}

impl From<CancellationTime> for ParamValue {
    fn from(value: CancellationTime) -> Self {
        ParamValue::from(value.as_str())
    }
}

/// The VPS service API.
pub struct VpsApi<C: Connector> {
    session: SessionClient<C>,
}

impl<C: Connector> VpsApi<C> {
    /// Prepare an API client. No network activity until the first call.
    ///
    /// # Errors
    ///
    /// Propagates key normalization and parsing failures from
    /// [`SessionClient::new`].
    pub fn new(settings: Settings, connector: C) -> Result<Self, Report<ApiError>> {
        Ok(Self {
            session: SessionClient::new(settings, connector)?,
        })
    }

    pub fn session(&self) -> &SessionClient<C> {
        &self.session
    }

    fn call(&self, method: &str, args: &[ParamValue]) -> Result<Value, Report<ApiError>> {
        self.session.call(method, args)
    }

    /// Get available VPS products.
    pub fn get_available_products(&self) -> Result<Value, Report<ApiError>> {
        self.call("getAvailableProducts", &[])
    }

    /// Get all available VPS addons.
    pub fn get_available_addons(&self) -> Result<Value, Report<ApiError>> {
        self.call("getAvailableAddons", &[])
    }

    /// Get the addons currently active for a VPS.
    pub fn get_active_addons_for_vps(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getActiveAddonsForVps", &[vps_name.into()])
    }

    /// Get the products a VPS can be upgraded to.
    pub fn get_available_upgrades(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getAvailableUpgrades", &[vps_name.into()])
    }

    /// Get the addons that can still be ordered for a VPS.
    pub fn get_available_addons_for_vps(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getAvailableAddonsForVps", &[vps_name.into()])
    }

    /// Get the addons that can be cancelled for a VPS.
    pub fn get_cancellable_addons_for_vps(
        &self,
        vps_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("getCancellableAddonsForVps", &[vps_name.into()])
    }

    /// Order a VPS with optional addons and an operating system.
    pub fn order_vps(
        &self,
        product_name: &str,
        addons: &[&str],
        operating_system_name: &str,
        hostname: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "orderVps",
            &[
                product_name.into(),
                addons.to_vec().into(),
                operating_system_name.into(),
                hostname.into(),
            ],
        )
    }

    /// Order addons for an existing VPS.
    pub fn order_addon(&self, vps_name: &str, addons: &[&str]) -> Result<Value, Report<ApiError>> {
        self.call("orderAddon", &[vps_name.into(), addons.to_vec().into()])
    }

    /// Order a private network.
    pub fn order_private_network(&self) -> Result<Value, Report<ApiError>> {
        self.call("orderPrivateNetwork", &[])
    }

    /// Upgrade a VPS to another product.
    pub fn upgrade_vps(
        &self,
        vps_name: &str,
        upgrade_to_product_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "upgradeVps",
            &[vps_name.into(), upgrade_to_product_name.into()],
        )
    }

    /// Cancel a VPS.
    pub fn cancel_vps(
        &self,
        vps_name: &str,
        end_time: CancellationTime,
    ) -> Result<Value, Report<ApiError>> {
        self.call("cancelVps", &[vps_name.into(), end_time.into()])
    }

    /// Cancel a VPS addon.
    pub fn cancel_addon(
        &self,
        vps_name: &str,
        addon_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("cancelAddon", &[vps_name.into(), addon_name.into()])
    }

    /// Cancel a private network.
    pub fn cancel_private_network(
        &self,
        private_network_name: &str,
        end_time: CancellationTime,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "cancelPrivateNetwork",
            &[private_network_name.into(), end_time.into()],
        )
    }

    /// Get the private networks a VPS is attached to.
    pub fn get_private_networks_by_vps(
        &self,
        vps_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("getPrivateNetworksByVps", &[vps_name.into()])
    }

    /// Get all private networks for the account.
    pub fn get_all_private_networks(&self) -> Result<Value, Report<ApiError>> {
        self.call("getAllPrivateNetworks", &[])
    }

    /// Attach a VPS to a private network.
    pub fn add_vps_to_private_network(
        &self,
        vps_name: &str,
        private_network_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "addVpsToPrivateNetwork",
            &[vps_name.into(), private_network_name.into()],
        )
    }

    /// Detach a VPS from a private network.
    pub fn remove_vps_from_private_network(
        &self,
        vps_name: &str,
        private_network_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "removeVpsFromPrivateNetwork",
            &[vps_name.into(), private_network_name.into()],
        )
    }

    /// Amount of traffic used by a VPS this period, in bytes.
    pub fn get_amount_of_traffic_used(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getAmountOfTrafficUsed", &[vps_name.into()])
    }

    /// Traffic counters for a VPS.
    pub fn get_traffic_information_for_vps(
        &self,
        vps_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("getTrafficInformationForVps", &[vps_name.into()])
    }

    /// Start a stopped VPS.
    pub fn start(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("start", &[vps_name.into()])
    }

    /// Stop a running VPS.
    pub fn stop(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("stop", &[vps_name.into()])
    }

    /// Hard-reset a VPS.
    pub fn reset(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("reset", &[vps_name.into()])
    }

    /// Create a snapshot of a VPS.
    pub fn create_snapshot(
        &self,
        vps_name: &str,
        description: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("createSnapshot", &[vps_name.into(), description.into()])
    }

    /// Revert a VPS to a snapshot.
    pub fn revert_snapshot(
        &self,
        vps_name: &str,
        snapshot_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("revertSnapshot", &[vps_name.into(), snapshot_name.into()])
    }

    /// Remove a snapshot.
    pub fn remove_snapshot(
        &self,
        vps_name: &str,
        snapshot_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("removeSnapshot", &[vps_name.into(), snapshot_name.into()])
    }

    /// Get a single VPS by name.
    pub fn get_vps(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getVps", &[vps_name.into()])
    }

    /// Get all VPSes for the account.
    pub fn get_vpses(&self) -> Result<Value, Report<ApiError>> {
        self.call("getVpses", &[])
    }

    /// Get the snapshots of a VPS.
    pub fn get_snapshots_by_vps(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getSnapshotsByVps", &[vps_name.into()])
    }

    /// Get the installable operating systems.
    pub fn get_operating_systems(&self) -> Result<Value, Report<ApiError>> {
        self.call("getOperatingSystems", &[])
    }

    /// Reinstall a VPS with the given operating system.
    pub fn install_operating_system(
        &self,
        vps_name: &str,
        operating_system_name: &str,
        hostname: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call(
            "installOperatingSystem",
            &[
                vps_name.into(),
                operating_system_name.into(),
                hostname.into(),
            ],
        )
    }

    /// Get the IP addresses of a VPS.
    pub fn get_ips_for_vps(&self, vps_name: &str) -> Result<Value, Report<ApiError>> {
        self.call("getIpsForVps", &[vps_name.into()])
    }

    /// Get all IP addresses for the account.
    pub fn get_all_ips(&self) -> Result<Value, Report<ApiError>> {
        self.call("getAllIps", &[])
    }

    /// Add an IPv6 address from the account's range to a VPS.
    pub fn add_ipv6_to_vps(
        &self,
        vps_name: &str,
        ipv6_address: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("addIpv6ToVps", &[vps_name.into(), ipv6_address.into()])
    }

    /// Update the PTR record (reverse DNS) for an IPv4 or IPv6 address.
    pub fn update_ptr_record(
        &self,
        ip_address: &str,
        ptr_record: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("updatePtrRecord", &[ip_address.into(), ptr_record.into()])
    }

    /// Enable or disable the customer lock for a VPS.
    pub fn set_customer_lock(
        &self,
        vps_name: &str,
        enabled: bool,
    ) -> Result<Value, Report<ApiError>> {
        self.call("setCustomerLock", &[vps_name.into(), enabled.into()])
    }

    /// Hand a VPS over to another account.
    pub fn handover_vps(
        &self,
        vps_name: &str,
        target_account_name: &str,
    ) -> Result<Value, Report<ApiError>> {
        self.call("handoverVps", &[vps_name.into(), target_account_name.into()])
    }
}
