use retrochat::chat::{ChatError, ChatPolicy, ChatService};
use retrochat::identity::StaticIdentity;
use retrochat::store::{ChatFilter, ChatStore, InMemoryChatStore};
use std::sync::Arc;

const ADA: &str = "ada@example.com";
const BOB: &str = "bob@example.com";

fn service_as(store: &Arc<dyn ChatStore>, principal: &str, policy: ChatPolicy) -> ChatService {
    ChatService::new(
        Arc::clone(store),
        Arc::new(StaticIdentity::signed_in(principal)),
        policy,
    )
}

fn shared_store() -> Arc<dyn ChatStore> {
    Arc::new(InMemoryChatStore::new())
}

#[test]
fn chat_service_creating_the_same_name_twice_fails_with_already_exists() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    let bob = service_as(&store, BOB, ChatPolicy::default());

    ada.create_chat("team").expect("first create");
    assert!(matches!(ada.create_chat("team"), Err(ChatError::AlreadyExists)));
    assert!(matches!(bob.create_chat("team"), Err(ChatError::AlreadyExists)));
}

#[test]
fn chat_service_new_chat_has_owner_as_sole_member_and_no_messages() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    ada.create_chat("team").expect("create");

    let chat = ada.get_chat("team").expect("chat");
    assert_eq!(chat.name, "team");
    assert_eq!(chat.created_by, ADA);
    assert_eq!(chat.members, vec![ADA.to_string()]);
    assert!(chat.messages.is_empty());
}

#[test]
fn chat_service_non_owner_cannot_delete_or_add_members() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    let bob = service_as(&store, BOB, ChatPolicy::default());
    ada.create_chat("team").expect("create");
    ada.add_member_to_chat("team", BOB).expect("add bob");

    assert!(matches!(bob.delete_chat("team"), Err(ChatError::Forbidden)));
    assert!(matches!(
        bob.add_member_to_chat("team", "carol@example.com"),
        Err(ChatError::Forbidden)
    ));
    assert_eq!(store.find(&ChatFilter::name("team")).expect("find").len(), 1);
}

#[test]
fn chat_service_missing_chats_fail_with_not_found() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());

    assert!(matches!(ada.get_chat("nope"), Err(ChatError::NotFound)));
    assert!(matches!(ada.delete_chat("nope"), Err(ChatError::NotFound)));
    assert!(matches!(
        ada.add_member_to_chat("nope", BOB),
        Err(ChatError::NotFound)
    ));
    assert!(matches!(
        ada.add_message_to_chat("nope", "hi"),
        Err(ChatError::NotFound)
    ));
    assert_eq!(ChatError::NotFound.to_string(), "Chat does not exist");
}

#[test]
fn chat_service_signed_out_caller_is_unauthorized_everywhere() {
    let store = shared_store();
    service_as(&store, ADA, ChatPolicy::default())
        .create_chat("team")
        .expect("create");
    let anon = ChatService::new(
        Arc::clone(&store),
        Arc::new(StaticIdentity::signed_out()),
        ChatPolicy::default(),
    );

    assert!(matches!(anon.list_chats(), Err(ChatError::Unauthorized)));
    assert!(matches!(anon.get_chat("team"), Err(ChatError::Unauthorized)));
    assert!(matches!(anon.create_chat("x"), Err(ChatError::Unauthorized)));
    assert!(matches!(anon.delete_chat("team"), Err(ChatError::Unauthorized)));
    assert!(matches!(
        anon.add_member_to_chat("team", BOB),
        Err(ChatError::Unauthorized)
    ));
    assert!(matches!(
        anon.add_message_to_chat("team", "hi"),
        Err(ChatError::Unauthorized)
    ));
}

#[test]
fn chat_service_visibility_follows_membership() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    let bob = service_as(&store, BOB, ChatPolicy::default());
    ada.create_chat("team").expect("create");
    ada.create_chat("private").expect("create");
    bob.create_chat("bobs").expect("create");

    assert_eq!(ada.list_chats().expect("list"), vec!["team", "private"]);
    assert_eq!(bob.list_chats().expect("list"), vec!["bobs"]);
    assert!(matches!(bob.get_chat("team"), Err(ChatError::NotFound)));

    ada.add_member_to_chat("team", BOB).expect("add");
    assert_eq!(bob.list_chats().expect("list"), vec!["team", "bobs"]);
    assert_eq!(bob.get_chat("team").expect("chat").name, "team");
}

#[test]
fn chat_service_owner_delete_is_a_hard_delete() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    ada.create_chat("team").expect("create");
    ada.delete_chat("team").expect("delete");

    assert!(store.find(&ChatFilter::All).expect("find").is_empty());
    ada.create_chat("team").expect("name is free again");
}

#[test]
fn chat_service_messages_are_appended_in_order_with_caller_as_sender() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    let bob = service_as(&store, BOB, ChatPolicy::default());
    ada.create_chat("team").expect("create");
    ada.add_member_to_chat("team", BOB).expect("add");

    ada.add_message_to_chat("team", "hello").expect("msg");
    bob.add_message_to_chat("team", "hi ada").expect("msg");

    let messages = ada.get_chat("team").expect("chat").messages;
    let rendered = messages
        .iter()
        .map(|message| (message.sender.as_str(), message.msg.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(rendered, vec![(ADA, "hello"), (BOB, "hi ada")]);
}

#[test]
fn chat_service_default_policy_requires_membership_to_post() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    let bob = service_as(&store, BOB, ChatPolicy::default());
    ada.create_chat("team").expect("create");

    let err = bob
        .add_message_to_chat("team", "let me in")
        .expect_err("non-member");
    assert!(matches!(err, ChatError::NotAMember));
    assert!(ada.get_chat("team").expect("chat").messages.is_empty());
}

#[test]
fn chat_service_permissive_policy_lets_any_caller_post_and_repeat_members() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::permissive());
    let bob = service_as(&store, BOB, ChatPolicy::permissive());
    ada.create_chat("team").expect("create");

    bob.add_message_to_chat("team", "drive-by").expect("msg");
    ada.add_member_to_chat("team", BOB).expect("add");
    ada.add_member_to_chat("team", BOB).expect("add again");

    let chat = ada.get_chat("team").expect("chat");
    assert_eq!(chat.messages.len(), 1);
    assert_eq!(chat.members, vec![ADA, BOB, BOB]);
}

#[test]
fn chat_service_unique_members_makes_repeat_adds_idempotent() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());
    ada.create_chat("team").expect("create");

    ada.add_member_to_chat("team", BOB).expect("add");
    ada.add_member_to_chat("team", BOB).expect("add again");
    ada.add_member_to_chat("team", ADA).expect("owner again");

    assert_eq!(ada.get_chat("team").expect("chat").members, vec![ADA, BOB]);
}

#[test]
fn chat_service_rejects_names_that_cannot_be_entered() {
    let store = shared_store();
    let ada = service_as(&store, ADA, ChatPolicy::default());

    for name in ["", "..", "a/b", "/team"] {
        assert!(
            matches!(ada.create_chat(name), Err(ChatError::InvalidName { .. })),
            "{name}"
        );
    }
    assert!(store.find(&ChatFilter::All).expect("find").is_empty());
}
