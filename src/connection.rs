//! Connection lifecycle
//!
//! Drives a scheme through its connect/disconnect lifecycle by invoking
//! ifup and ifdown and interpreting their output. Activation moves a
//! scheme Idle -> Activating -> Connected or Failed; deactivation moves
//! it Connected -> Deactivating -> Idle. The states are carried by the
//! call protocol, not by a retained object: a successful [`ConnectionDriver::activate`]
//! is Connected, an error is Failed.

use crate::config::SchemectlConfig;
use crate::error::{SchemeError, SchemeResult};
use crate::process::{CommandRunner, SystemRunner};
use crate::scheme::Scheme;
use crate::validation;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default location of the ifup binary
const IFUP_BIN: &str = "/sbin/ifup";
/// Default location of the ifdown binary
const IFDOWN_BIN: &str = "/sbin/ifdown";

/// Line prefix the DHCP client prints when a lease is bound
const BOUND_PREFIX: &str = "bound to ";

/// A live connection produced by activating a scheme.
#[derive(Debug, Clone)]
pub struct Connection<'a> {
    /// The scheme this connection came from
    pub scheme: &'a Scheme,
    /// Address bound during activation; parsed from ifup output for
    /// dhcp schemes, taken from the `address` option otherwise
    pub ip_address: Option<String>,
}

/// Brings schemes up and down via the system's ifup/ifdown commands.
pub struct ConnectionDriver<R: CommandRunner = SystemRunner> {
    runner: R,
    ifup: PathBuf,
    ifdown: PathBuf,
}

impl ConnectionDriver<SystemRunner> {
    /// Driver using the system commands at their standard locations.
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }

    /// Driver using the command locations from a configuration.
    pub fn from_config(config: &SchemectlConfig) -> Self {
        Self::with_commands(
            SystemRunner,
            config.commands.ifup.clone(),
            config.commands.ifdown.clone(),
        )
    }
}

impl Default for ConnectionDriver<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> ConnectionDriver<R> {
    /// Driver with a custom process layer and standard command locations.
    pub fn with_runner(runner: R) -> Self {
        Self::with_commands(runner, IFUP_BIN, IFDOWN_BIN)
    }

    /// Driver with a custom process layer and command locations.
    pub fn with_commands(
        runner: R,
        ifup: impl Into<PathBuf>,
        ifdown: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            ifup: ifup.into(),
            ifdown: ifdown.into(),
        }
    }

    /// Connect to the network as configured in the scheme.
    ///
    /// Any prior state is torn down first: ifup refuses to bring up an
    /// interface it considers already configured. A reported ifdown
    /// failure during that cleanup is ignored (there may simply be
    /// nothing to tear down); a failure to invoke ifdown at all still
    /// aborts.
    pub fn activate<'a>(&self, scheme: &'a Scheme) -> SchemeResult<Connection<'a>> {
        match self.deactivate(scheme) {
            Ok(()) => {}
            Err(SchemeError::DeactivationFailed { output, .. }) => {
                debug!(
                    "Ignoring ifdown failure before activating {}: {}",
                    scheme.iface(),
                    output.trim()
                );
            }
            Err(e) => return Err(e),
        }

        info!("Bringing up {}", scheme.iface());
        let result = self.runner.run(&self.ifup, &scheme.as_args())?;
        if !result.success {
            return Err(SchemeError::ActivationFailed {
                scheme: scheme.iface(),
                code: result.code,
                output: result.output,
            });
        }

        self.parse_ifup_output(scheme, &result.output)
    }

    /// Disconnect from the network as configured in the scheme.
    pub fn deactivate(&self, scheme: &Scheme) -> SchemeResult<()> {
        validation::validate_interface_name(&scheme.interface)?;

        debug!("Bringing down {}", scheme.interface);
        let result = self.runner.run(&self.ifdown, &[scheme.interface.clone()])?;
        if !result.success {
            return Err(SchemeError::DeactivationFailed {
                interface: scheme.interface.clone(),
                code: result.code,
                output: result.output,
            });
        }
        Ok(())
    }

    /// Classify successful ifup output into a connection.
    ///
    /// dhcp schemes must report a bound address; for any other type the
    /// address comes from the scheme's own `address` option and the
    /// output is not inspected.
    fn parse_ifup_output<'a>(&self, scheme: &'a Scheme, output: &str) -> SchemeResult<Connection<'a>> {
        if scheme.is_dhcp() {
            let ip_address = bound_address(output).ok_or_else(|| SchemeError::NoAddressBound {
                scheme: scheme.iface(),
            })?;
            info!("Connected to {} with address {}", scheme.iface(), ip_address);
            Ok(Connection {
                scheme,
                ip_address: Some(ip_address),
            })
        } else {
            let ip_address = scheme
                .options
                .get("address")
                .and_then(|values| values.first())
                .cloned();
            Ok(Connection { scheme, ip_address })
        }
    }
}

/// Address from the first `bound to <address>` line, if any.
fn bound_address(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        line.strip_prefix(BOUND_PREFIX)
            .and_then(|rest| rest.split_whitespace().next())
            .map(|token| token.to_string())
    })
}
