//! Behaviour every [`DirectoryStore`] backend must share.
//!
//! Each backend's test module calls [`run_all`] with a constructor, so the
//! SQLite store and the in-memory double are held to the same expectations.

use staffdir_core::{DepartmentId, EmployeeId, NewDepartment, NewEmployee, RoleId};

use crate::error::StorageError;
use crate::traits::DirectoryStore;

pub(crate) fn run_all<S: DirectoryStore>(make: impl Fn() -> S) {
    insert_and_list_departments(make());
    duplicate_department_name_is_rejected(make());
    role_listing_carries_department_name(make());
    employee_listing_joins_role_department_and_manager(make());
    updates_return_none_for_missing_employee(make());
    dependent_counts(make());
    delete_reports_whether_a_row_was_removed(make());
    delete_with_dependents_is_integrity_error(make());
}

fn insert_and_list_departments<S: DirectoryStore>(mut store: S) {
    let eng = store
        .insert_department(&NewDepartment::new("Engineering").unwrap())
        .unwrap();
    let sales = store
        .insert_department(&NewDepartment::new("Sales").unwrap())
        .unwrap();

    let all = store.list_departments().unwrap();
    assert_eq!(all, vec![eng.clone(), sales]);
    assert_eq!(
        store.find_department_by_name("Engineering").unwrap(),
        Some(eng.clone())
    );
    assert_eq!(store.find_department_by_name("engineering").unwrap(), None);
    assert_eq!(store.get_department(eng.id).unwrap(), Some(eng));
    assert_eq!(store.get_department(DepartmentId(999)).unwrap(), None);
}

fn duplicate_department_name_is_rejected<S: DirectoryStore>(mut store: S) {
    let new = NewDepartment::new("Engineering").unwrap();
    store.insert_department(&new).unwrap();
    let err = store.insert_department(&new).unwrap_err();
    assert!(matches!(err, StorageError::Duplicate { .. }), "got {err:?}");
    assert_eq!(store.list_departments().unwrap().len(), 1);
}

fn role_listing_carries_department_name<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Engineering").unwrap())
        .unwrap();
    let role = store.insert_role("Engineer", 80000.0, dept.id).unwrap();
    assert_eq!(role.title, "Engineer");
    assert_eq!(role.department_id, dept.id);

    let roles = store.list_roles().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, role.id);
    assert_eq!(roles[0].salary, 80000.0);
    assert_eq!(roles[0].department_name.as_deref(), Some("Engineering"));
    assert_eq!(store.get_role(role.id).unwrap(), Some(role));
}

fn employee_listing_joins_role_department_and_manager<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Engineering").unwrap())
        .unwrap();
    let role = store.insert_role("Engineer", 80000.0, dept.id).unwrap();
    let boss = store
        .insert_employee(&NewEmployee::new("Grace", "Hopper", role.id, None).unwrap())
        .unwrap();
    let ada = store
        .insert_employee(&NewEmployee::new("Ada", "Lovelace", role.id, Some(boss.id)).unwrap())
        .unwrap();
    assert_eq!(ada.manager_id, Some(boss.id));

    let listing = store.list_employees().unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].manager, None);
    assert_eq!(listing[1].first_name, "Ada");
    assert_eq!(listing[1].title.as_deref(), Some("Engineer"));
    assert_eq!(listing[1].salary, Some(80000.0));
    assert_eq!(listing[1].department.as_deref(), Some("Engineering"));
    assert_eq!(listing[1].manager.as_deref(), Some("Grace Hopper"));

    // Listing twice without mutation yields the same rows.
    assert_eq!(store.list_employees().unwrap(), listing);
}

fn updates_return_none_for_missing_employee<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Ops").unwrap())
        .unwrap();
    let role = store.insert_role("SRE", 1.0, dept.id).unwrap();
    let other = store.insert_role("DBA", 2.0, dept.id).unwrap();
    let emp = store
        .insert_employee(&NewEmployee::new("Ken", "Thompson", role.id, None).unwrap())
        .unwrap();

    assert_eq!(
        store.update_employee_role(EmployeeId(999), role.id).unwrap(),
        None
    );
    assert_eq!(
        store.update_employee_manager(EmployeeId(999), None).unwrap(),
        None
    );

    let moved = store.update_employee_role(emp.id, other.id).unwrap().unwrap();
    assert_eq!(moved.role_id, other.id);

    let boss = store
        .insert_employee(&NewEmployee::new("Dennis", "Ritchie", role.id, None).unwrap())
        .unwrap();
    let managed = store
        .update_employee_manager(emp.id, Some(boss.id))
        .unwrap()
        .unwrap();
    assert_eq!(managed.manager_id, Some(boss.id));
    let cleared = store.update_employee_manager(emp.id, None).unwrap().unwrap();
    assert_eq!(cleared.manager_id, None);
}

fn dependent_counts<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Ops").unwrap())
        .unwrap();
    let empty = store
        .insert_department(&NewDepartment::new("Empty").unwrap())
        .unwrap();
    let role = store.insert_role("SRE", 1.0, dept.id).unwrap();
    store.insert_role("Unfilled", 1.0, dept.id).unwrap();
    let boss = store
        .insert_employee(&NewEmployee::new("Grace", "Hopper", role.id, None).unwrap())
        .unwrap();
    store
        .insert_employee(&NewEmployee::new("Ada", "Lovelace", role.id, Some(boss.id)).unwrap())
        .unwrap();

    assert_eq!(store.count_roles_in_department(dept.id).unwrap(), 2);
    assert_eq!(store.count_roles_in_department(empty.id).unwrap(), 0);
    assert_eq!(store.count_employees_in_department(dept.id).unwrap(), 2);
    assert_eq!(store.count_employees_in_department(empty.id).unwrap(), 0);
    assert_eq!(store.count_employees_with_role(role.id).unwrap(), 2);
    assert_eq!(store.count_employees_with_role(RoleId(999)).unwrap(), 0);
    assert_eq!(store.count_direct_reports(boss.id).unwrap(), 1);
}

fn delete_reports_whether_a_row_was_removed<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Ops").unwrap())
        .unwrap();
    let role = store.insert_role("SRE", 1.0, dept.id).unwrap();
    let emp = store
        .insert_employee(&NewEmployee::new("Ken", "Thompson", role.id, None).unwrap())
        .unwrap();

    assert!(store.delete_employee(emp.id).unwrap());
    assert!(!store.delete_employee(emp.id).unwrap());
    assert!(store.delete_role(role.id).unwrap());
    assert!(!store.delete_role(role.id).unwrap());
    assert!(store.delete_department(dept.id).unwrap());
    assert!(!store.delete_department(dept.id).unwrap());
    assert!(store.list_departments().unwrap().is_empty());
}

fn delete_with_dependents_is_integrity_error<S: DirectoryStore>(mut store: S) {
    let dept = store
        .insert_department(&NewDepartment::new("Ops").unwrap())
        .unwrap();
    let role = store.insert_role("SRE", 1.0, dept.id).unwrap();
    let boss = store
        .insert_employee(&NewEmployee::new("Grace", "Hopper", role.id, None).unwrap())
        .unwrap();
    store
        .insert_employee(&NewEmployee::new("Ada", "Lovelace", role.id, Some(boss.id)).unwrap())
        .unwrap();

    let err = store.delete_department(dept.id).unwrap_err();
    assert!(matches!(err, StorageError::IntegrityError { .. }), "department: {err:?}");
    let err = store.delete_role(role.id).unwrap_err();
    assert!(matches!(err, StorageError::IntegrityError { .. }), "role: {err:?}");
    let err = store.delete_employee(boss.id).unwrap_err();
    assert!(matches!(err, StorageError::IntegrityError { .. }), "employee: {err:?}");

    assert_eq!(store.list_departments().unwrap().len(), 1);
    assert_eq!(store.list_roles().unwrap().len(), 1);
    assert_eq!(store.list_employees().unwrap().len(), 2);
}
