use super::*;

#[test]
fn delete_succeeds_on_no_content() {
    assert_eq!(Operation::DeleteMessage.success_status(), 204);
    assert_eq!(Operation::DeleteMessage.method(), Method::DELETE);
}

#[test]
fn create_channel_succeeds_on_created() {
    assert_eq!(Operation::CreateChannel.success_status(), 201);
    assert_eq!(Operation::CreateChannel.method(), Method::POST);
}

#[test]
fn everything_else_succeeds_on_ok() {
    for op in [
        Operation::Connect,
        Operation::SendMessage,
        Operation::ReceiveMessage,
        Operation::EditMessage,
        Operation::GetUserInfo,
        Operation::GetChannelInfo,
        Operation::FetchChannelMessages,
        Operation::GetUserMessages,
        Operation::GetUserFriends,
    ] {
        assert_eq!(op.success_status(), 200, "{op}");
    }
}

#[test]
fn edit_uses_put() {
    assert_eq!(Operation::EditMessage.method(), Method::PUT);
    assert_eq!(Operation::SendMessage.method(), Method::POST);
    assert_eq!(Operation::GetUserFriends.method(), Method::GET);
}

#[test]
fn display_is_snake_case_name() {
    assert_eq!(Operation::GetChannelInfo.to_string(), "get_channel_info");
    assert_eq!(Operation::Connect.as_str(), "connect");
}
