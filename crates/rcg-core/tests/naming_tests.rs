use insta::assert_snapshot;
use rcg_core::transform::name_normalizer::*;

#[test]
fn snake_case() {
    assert_snapshot!(to_snake_case("HTTPServer"), @"http_server");
    assert_snapshot!(to_snake_case("UserLoginByIDRequest"), @"user_login_by_id_request");
    assert_snapshot!(to_snake_case("Cats & Dogs"), @"cats_and_dogs");
    assert_snapshot!(to_snake_case("/pets/{petId}"), @"pets_pet_id");
    assert_snapshot!(to_snake_case("test_with_multiple_abbreviations_SMZ_API_2FA"), @"test_with_multiple_abbreviations_smz_api_2fa");
}

#[test]
fn pascal_and_camel_case() {
    assert_snapshot!(to_pascal_case("SMZ"), @"SMZ");
    assert_snapshot!(to_pascal_case("v1_resend_SMZ_status_check_response"), @"V1ResendSMZStatusCheckResponse");
    assert_snapshot!(to_pascal_case("response_1p"), @"Response1P");
    assert_snapshot!(to_camel_case("UserID"), @"userID");
    assert_snapshot!(to_camel_case("user_id"), @"userId");
}

#[test]
fn param_names() {
    assert_snapshot!(to_param_name("class"), @"class_");
    assert_snapshot!(to_param_name("user_id"), @"user_id");
    assert_snapshot!(normalize_path("/users/{userId}/posts/{class}"), @"/users/{user_id}/posts/{class_}");
    assert_snapshot!(fallback_operation_id("get", "/users/{userId}/posts"), @"get_users_user__id_posts");
}

#[test]
fn type_annotations() {
    assert_snapshot!(to_type_annotation("user_profile"), @"UserProfile");
    assert_snapshot!(to_type_annotation("list[Pet]"), @"list[Pet]");
    assert_snapshot!(to_type_annotation("page[Item]"), @"Page[Item]");
    assert_snapshot!(ref_to_model_name("#/components/schemas/user_profile"), @"UserProfile");
}

#[test]
fn snake_case_is_idempotent() {
    for input in [
        "v1_resend_SMZ_status_check_response",
        "XMLHttpRequest",
        "user.Profile-v2",
        "2FA_token",
        "already_snake",
    ] {
        let once = to_snake_case(input);
        assert_eq!(to_snake_case(&once), once, "not idempotent for {input:?}");
    }
}
