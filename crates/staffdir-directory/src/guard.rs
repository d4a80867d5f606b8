//! Referential-integrity pre-checks.
//!
//! [`IntegrityGuard`] answers "may this delete or reassignment proceed?"
//! using read-only counts from the store. Checks run in a fixed order and
//! the first violated one determines the reported [`BlockReason`].
//!
//! The guard and the mutation that follows are separate statements. The
//! schema's `ON DELETE RESTRICT` foreign keys remain the authoritative
//! enforcement if a dependent row appears in between.

use std::collections::HashSet;

use staffdir_core::{
    BlockReason, Department, DepartmentId, DirectoryError, EmployeeId, EntityKind, RoleId,
};
use staffdir_storage::DirectoryStore;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Blocked(BlockReason),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }

    /// Converts a block into [`DirectoryError::Integrity`].
    pub fn into_result(self) -> Result<(), DirectoryError> {
        match self {
            GuardDecision::Allowed => Ok(()),
            GuardDecision::Blocked(reason) => Err(DirectoryError::Integrity(reason)),
        }
    }
}

/// Read-only integrity checks over a borrowed store.
pub struct IntegrityGuard<'a, S: DirectoryStore> {
    store: &'a S,
}

impl<'a, S: DirectoryStore> IntegrityGuard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        IntegrityGuard { store }
    }

    /// Roles of the department are checked before employees holding those
    /// roles.
    pub fn can_delete_department(&self, id: DepartmentId) -> Result<GuardDecision, DirectoryError> {
        if self.store.count_roles_in_department(id)? > 0 {
            return Ok(GuardDecision::Blocked(BlockReason::RolesExist));
        }
        if self.store.count_employees_in_department(id)? > 0 {
            return Ok(GuardDecision::Blocked(BlockReason::EmployeesExistViaRoles));
        }
        Ok(GuardDecision::Allowed)
    }

    pub fn can_delete_role(&self, id: RoleId) -> Result<GuardDecision, DirectoryError> {
        if self.store.count_employees_with_role(id)? > 0 {
            return Ok(GuardDecision::Blocked(BlockReason::EmployeesExist));
        }
        Ok(GuardDecision::Allowed)
    }

    pub fn can_delete_employee(&self, id: EmployeeId) -> Result<GuardDecision, DirectoryError> {
        if self.store.count_direct_reports(id)? > 0 {
            return Ok(GuardDecision::Blocked(BlockReason::ManagesOtherEmployees));
        }
        Ok(GuardDecision::Allowed)
    }

    pub fn resolve_department_by_name(&self, name: &str) -> Result<Department, DirectoryError> {
        self.store
            .find_department_by_name(name)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Department, name))
    }

    /// Whether walking up the manager chain from `start` reaches `target`.
    ///
    /// `start` itself counts. Stops on a chain that already loops without
    /// passing through `target`.
    pub fn manager_chain_reaches(
        &self,
        start: EmployeeId,
        target: EmployeeId,
    ) -> Result<bool, DirectoryError> {
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if id == target {
                return Ok(true);
            }
            if !seen.insert(id) {
                return Ok(false);
            }
            current = self.store.get_employee(id)?.and_then(|e| e.manager_id);
        }
        Ok(false)
    }
}
