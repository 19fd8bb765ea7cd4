//! UUID-backed identifiers carried by the execution context.
//!
//! Defined with `domain_key::define_uuid!`, so each type is `Copy`, parses
//! from and displays as a UUID string, and cannot be mixed with the other.

use domain_key::define_uuid;

define_uuid!(pub ExecutionIdDomain => ExecutionId);
define_uuid!(pub NodeIdDomain => NodeId);
