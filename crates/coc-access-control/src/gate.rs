//! # Access Gate
//!
//! Composes the pipeline every operation passes through:
//!
//! ```text
//! user path:  creator -> identity -> trusted gateway -> side channel
//!             -> principal id -> role claim (registry) -> domain -> policy
//! admin path: creator -> identity -> admin marker + admin organization
//! ```
//!
//! Each stage returns a typed error; the first failure ends the pipeline.

use crate::config::{AccessControlConfig, ConfigError};
use crate::domain::{
    validate_admin, validate_gateway, Action, DomainRouter, IdentityInfo, ObjectRef, PolicyRequest,
    PrincipalId, UserContext, VerifiedAdmin,
};
use crate::ports::{IdentityVerifier, PolicyEngine};
use crate::registry::PrincipalRegistry;
use coc_ledger::{ChaincodeStub, TransactionContext};
use coc_types::{
    AuthorizationError, ChaincodeError, ChaincodeResult, IdentityError, PolicyDomain, Role,
    ValidationError,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A delegated end user whose role claim the registry confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub role: Role,
    pub principal: PrincipalId,
}

/// Access-control pipeline shared by all transactions.
pub struct AccessGate {
    config: AccessControlConfig,
    router: DomainRouter,
    verifier: Arc<dyn IdentityVerifier>,
    engine: Arc<dyn PolicyEngine>,
}

impl AccessGate {
    /// Validates `config` first; an invalid one never reaches the trust
    /// checks or the router.
    pub fn new(
        config: AccessControlConfig,
        verifier: Arc<dyn IdentityVerifier>,
        engine: Arc<dyn PolicyEngine>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let router = DomainRouter::new(&config.channels);
        Ok(Self {
            config,
            router,
            verifier,
            engine,
        })
    }

    pub fn config(&self) -> &AccessControlConfig {
        &self.config
    }

    /// Policy domain of the transaction's channel.
    pub fn domain<C: TransactionContext + ?Sized>(&self, ctx: &C) -> PolicyDomain {
        self.router.route(ctx.channel_id())
    }

    fn identity<C: TransactionContext + ?Sized>(&self, ctx: &C) -> Result<IdentityInfo, IdentityError> {
        let creator = ctx
            .creator()
            .map_err(|e| IdentityError::CreatorUnavailable(e.to_string()))?;
        self.verifier.extract(creator)
    }

    /// Run the user path up to and including the role claim check.
    #[instrument(skip_all, fields(channel = %stub.channel_id(), tx_id = %stub.tx_id()))]
    pub fn authenticate_user<S: ChaincodeStub + ?Sized>(
        &self,
        stub: &S,
    ) -> ChaincodeResult<AuthenticatedUser> {
        let identity = self.identity(stub).inspect_err(|e| {
            warn!(error = %e, "Failed to extract submitter identity");
        })?;

        validate_gateway(&identity, &self.config.gateway).inspect_err(|e| {
            warn!(submitter = %identity, error = %e, "Submitter is not the trusted gateway");
        })?;

        let transient = stub
            .transient()
            .map_err(|_| ValidationError::MissingTransientField(self.config.transient.user_id.clone()))?;
        let context = UserContext::from_transient(transient, &self.config.transient)
            .inspect_err(|e| warn!(error = %e, "Invalid user context"))?;

        let principal = PrincipalId::build(
            &self.config.gateway.organization_id,
            &self.config.gateway.common_name,
            &context.user_id,
        );

        PrincipalRegistry::new(stub)
            .validate_claim(&principal, &context.claimed_role)
            .inspect_err(|e| {
                warn!(
                    principal = %principal,
                    claimed = %context.claimed_role,
                    error = %e,
                    "Role claim rejected"
                );
            })?;

        // The registry only grants vocabulary roles, so a held claim parses.
        let role = context.claimed_role.parse::<Role>()?;

        debug!(principal = %principal, role = %role, "User authenticated");
        Ok(AuthenticatedUser {
            user_id: context.user_id,
            role,
            principal,
        })
    }

    /// Ask the policy engine. Engine failures deny.
    pub fn authorize(
        &self,
        user: &AuthenticatedUser,
        domain: PolicyDomain,
        object: &ObjectRef,
        action: Action,
    ) -> ChaincodeResult<()> {
        let request = PolicyRequest::new(user.role.as_str(), domain, object, action);

        let allowed = self.engine.enforce(&request).map_err(|e| {
            warn!(%request, error = %e, "Policy engine failed");
            ChaincodeError::from(e)
        })?;

        if !allowed {
            warn!(user = %user.user_id, %request, "Permission denied");
            return Err(AuthorizationError::PolicyDenied {
                role: request.role,
                domain: request.domain,
                object: request.object,
                action: request.action,
            }
            .into());
        }

        debug!(user = %user.user_id, %request, "Permission granted");
        Ok(())
    }

    /// Full user path followed by one policy check per requirement.
    pub fn authorize_user<S: ChaincodeStub + ?Sized>(
        &self,
        stub: &S,
        requirements: &[(ObjectRef, Action)],
    ) -> ChaincodeResult<AuthenticatedUser> {
        let user = self.authenticate_user(stub)?;
        let domain = self.domain(stub);
        for (object, action) in requirements {
            self.authorize(&user, domain, object, *action)?;
        }
        Ok(user)
    }

    /// Admin path. Bypasses the gateway and the side channel.
    #[instrument(skip_all, fields(channel = %ctx.channel_id(), tx_id = %ctx.tx_id()))]
    pub fn authenticate_admin<C: TransactionContext + ?Sized>(
        &self,
        ctx: &C,
    ) -> ChaincodeResult<VerifiedAdmin> {
        let identity = self.identity(ctx).inspect_err(|e| {
            warn!(error = %e, "Failed to extract submitter identity");
        })?;
        let submitter = identity.to_string();

        let admin = validate_admin(identity, &self.config.admin).inspect_err(|e| {
            warn!(%submitter, error = %e, "Admin verification failed");
        })?;

        debug!(%submitter, "Admin verified");
        Ok(admin)
    }
}
