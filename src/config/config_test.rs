use super::split_repo_arg;
use crate::app_error::AppError;

#[test]
fn test_split_repo_arg_happy_path() {
    let (owner, repo) = split_repo_arg("alice/widgets").unwrap();
    assert_eq!(owner, "alice");
    assert_eq!(repo, "widgets");
}

#[test]
fn test_split_repo_arg_rejects_missing_slash() {
    let res = split_repo_arg("widgets");
    assert!(matches!(res, Err(AppError::Config(_))));
}

#[test]
fn test_split_repo_arg_rejects_extra_segments() {
    let res = split_repo_arg("alice/widgets/extra");
    assert!(matches!(res, Err(AppError::Config(_))));
}

#[test]
fn test_split_repo_arg_rejects_empty_parts() {
    assert!(split_repo_arg("/widgets").is_err());
    assert!(split_repo_arg("alice/").is_err());
}
