//! Declarative authorization predicates.
//!
//! Every predicate is a pure function of the requesting [`Actor`], the HTTP method and,
//! where relevant, the target resource. Predicates never consult the store. Call sites
//! combine them explicitly with [`Policy::All`] and [`Policy::Any`]; there is no implicit
//! precedence between them.
//!
//! Identity comparison against an anonymous actor is never equal, and a predicate that needs
//! a resource denies when none is given.

use axum::http::Method;
use tracing::debug;

use crate::api::models::users::CurrentUser;
use crate::errors::Error;
use crate::types::UserId;

/// The requester as seen by the predicates. Immutable for the duration of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub identity: Option<UserId>,
    pub is_authenticated: bool,
    pub is_staff: bool,
    pub is_verified: bool,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            is_authenticated: false,
            is_staff: false,
            is_verified: false,
        }
    }

    /// True when `owner` is this actor's identity. Always false for an anonymous actor.
    pub fn is(&self, owner: UserId) -> bool {
        self.identity == Some(owner)
    }
}

impl From<&CurrentUser> for Actor {
    fn from(user: &CurrentUser) -> Self {
        Self {
            identity: Some(user.id),
            is_authenticated: true,
            is_staff: user.is_staff,
            is_verified: user.is_verified,
        }
    }
}

/// Entities with an owning user.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

/// GET, HEAD and OPTIONS do not mutate.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn owns(actor: &Actor, resource: Option<&dyn Owned>) -> bool {
    resource.is_some_and(|r| actor.is(r.owner_id()))
}

/// Reads are open; writes only by the owner.
pub fn is_owner_or_read_only(actor: &Actor, method: &Method, resource: Option<&dyn Owned>) -> bool {
    is_safe_method(method) || owns(actor, resource)
}

/// Only the owner, whatever the method.
pub fn is_owner(actor: &Actor, resource: Option<&dyn Owned>) -> bool {
    owns(actor, resource)
}

pub fn is_verified(actor: &Actor) -> bool {
    actor.is_authenticated && actor.is_verified
}

/// Staff may act on anything; everyone else only on what they own.
pub fn is_admin_or_owner(actor: &Actor, resource: Option<&dyn Owned>) -> bool {
    actor.is_staff || owns(actor, resource)
}

pub fn is_read_only(method: &Method) -> bool {
    is_safe_method(method)
}

pub fn is_authenticated(actor: &Actor) -> bool {
    actor.is_authenticated
}

pub fn is_admin(actor: &Actor) -> bool {
    actor.is_authenticated && actor.is_staff
}

/// A named predicate or an explicit combination of predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    OwnerOrReadOnly,
    OwnerOnly,
    VerifiedOnly,
    AdminOrOwner,
    ReadOnly,
    Authenticated,
    AdminOnly,
    /// Allows when every member allows. An empty list allows.
    All(Vec<Policy>),
    /// Allows when any member allows. An empty list denies.
    Any(Vec<Policy>),
}

impl Policy {
    pub fn evaluate(&self, actor: &Actor, method: &Method, resource: Option<&dyn Owned>) -> bool {
        match self {
            Policy::OwnerOrReadOnly => is_owner_or_read_only(actor, method, resource),
            Policy::OwnerOnly => is_owner(actor, resource),
            Policy::VerifiedOnly => is_verified(actor),
            Policy::AdminOrOwner => is_admin_or_owner(actor, resource),
            Policy::ReadOnly => is_read_only(method),
            Policy::Authenticated => is_authenticated(actor),
            Policy::AdminOnly => is_admin(actor),
            Policy::All(policies) => policies.iter().all(|p| p.evaluate(actor, method, resource)),
            Policy::Any(policies) => policies.iter().any(|p| p.evaluate(actor, method, resource)),
        }
    }
}

/// Evaluate `policy`, turning a denial into an error.
///
/// Anonymous actors get [`Error::Unauthenticated`]; authenticated actors get
/// [`Error::Forbidden`].
pub fn require(policy: &Policy, actor: &Actor, method: &Method, resource: Option<&dyn Owned>) -> Result<(), Error> {
    if policy.evaluate(actor, method, resource) {
        return Ok(());
    }

    debug!(?policy, identity = ?actor.identity, %method, "Request denied by policy");
    if actor.is_authenticated {
        Err(Error::Forbidden)
    } else {
        Err(Error::Unauthenticated { message: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Doc(UserId);

    impl Owned for Doc {
        fn owner_id(&self) -> UserId {
            self.0
        }
    }

    fn user(id: UserId) -> Actor {
        Actor {
            identity: Some(id),
            is_authenticated: true,
            is_staff: false,
            is_verified: false,
        }
    }

    fn all_methods() -> Vec<Method> {
        vec![
            Method::GET,
            Method::HEAD,
            Method::OPTIONS,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]
    }

    fn actors() -> Vec<Actor> {
        let id = Uuid::new_v4();
        vec![
            Actor::anonymous(),
            user(id),
            Actor { is_staff: true, ..user(id) },
            Actor { is_verified: true, ..user(id) },
        ]
    }

    #[test]
    fn test_safe_methods_are_read_only_for_everyone() {
        let other = Doc(Uuid::new_v4());
        for actor in actors() {
            for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
                assert!(is_read_only(&method));
                assert!(is_owner_or_read_only(&actor, &method, Some(&other)));
                assert!(is_owner_or_read_only(&actor, &method, None));
            }
        }
    }

    #[test]
    fn test_writes_are_not_read_only() {
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(!is_read_only(&method));
        }
    }

    #[test]
    fn test_non_owner_write_denied() {
        let other = Doc(Uuid::new_v4());
        for actor in actors() {
            for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
                assert!(!is_owner_or_read_only(&actor, &method, Some(&other)));
            }
            for method in all_methods() {
                assert!(!Policy::OwnerOnly.evaluate(&actor, &method, Some(&other)));
            }
        }
    }

    #[test]
    fn test_owner_write_allowed() {
        let id = Uuid::new_v4();
        let actor = user(id);
        let own = Doc(id);
        for method in all_methods() {
            assert!(is_owner_or_read_only(&actor, &method, Some(&own)));
            assert!(is_owner(&actor, Some(&own)));
            assert!(is_admin_or_owner(&actor, Some(&own)));
        }
    }

    #[test]
    fn test_missing_resource_denies() {
        let actor = user(Uuid::new_v4());
        assert!(!is_owner(&actor, None));
        assert!(!is_owner_or_read_only(&actor, &Method::PUT, None));
        assert!(!is_admin_or_owner(&actor, None));
    }

    #[test]
    fn test_anonymous_never_owns() {
        let anon = Actor::anonymous();
        let doc = Doc(Uuid::nil());
        assert!(!anon.is(Uuid::nil()));
        assert!(!is_owner(&anon, Some(&doc)));
        assert!(!is_admin_or_owner(&anon, Some(&doc)));
    }

    #[test]
    fn test_admin_or_owner_allows_staff() {
        let staff = Actor {
            is_staff: true,
            ..user(Uuid::new_v4())
        };
        let other = Doc(Uuid::new_v4());
        assert!(is_admin_or_owner(&staff, Some(&other)));
        assert!(is_admin_or_owner(&staff, None));
    }

    #[test]
    fn test_verified_only() {
        let id = Uuid::new_v4();
        assert!(!is_verified(&Actor::anonymous()));
        assert!(!is_verified(&user(id)));
        assert!(is_verified(&Actor { is_verified: true, ..user(id) }));

        // Unauthenticated actor with a stale verified flag still denied
        let odd = Actor {
            is_verified: true,
            ..Actor::anonymous()
        };
        assert!(!is_verified(&odd));
    }

    #[test]
    fn test_combinators() {
        let id = Uuid::new_v4();
        let own = Doc(id);
        let verified_owner = Policy::All(vec![Policy::VerifiedOnly, Policy::OwnerOnly]);

        assert!(!verified_owner.evaluate(&user(id), &Method::PUT, Some(&own)));
        assert!(verified_owner.evaluate(&Actor { is_verified: true, ..user(id) }, &Method::PUT, Some(&own)));

        let read_or_admin = Policy::Any(vec![Policy::ReadOnly, Policy::AdminOnly]);
        assert!(read_or_admin.evaluate(&Actor::anonymous(), &Method::GET, None));
        assert!(!read_or_admin.evaluate(&user(id), &Method::DELETE, None));

        assert!(Policy::All(vec![]).evaluate(&Actor::anonymous(), &Method::POST, None));
        assert!(!Policy::Any(vec![]).evaluate(&Actor::anonymous(), &Method::GET, None));
    }

    #[test]
    fn test_require_maps_denials() {
        let err = require(&Policy::Authenticated, &Actor::anonymous(), &Method::GET, None).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));

        let err = require(&Policy::AdminOnly, &user(Uuid::new_v4()), &Method::GET, None).unwrap_err();
        assert!(matches!(err, Error::Forbidden));

        let staff = Actor {
            is_staff: true,
            ..user(Uuid::new_v4())
        };
        assert!(require(&Policy::AdminOnly, &staff, &Method::GET, None).is_ok());
    }
}
