mod helpers;

use std::sync::Arc;

use studyai::application::ports::FlashcardSetRepository;
use studyai::application::services::{
    FlashcardOutcome, FlashcardPolicy, FlashcardService, GenerateFlashcardsRequest,
    ReplaceOutcome,
};
use studyai::domain::{FlashcardDraft, FlashcardSetId, UserId};
use studyai::infrastructure::llm::{EchoSummarizer, FailingSummarizer, ScriptedSummarizer};
use studyai::infrastructure::persistence::InMemoryFlashcardSetRepository;

use helpers::flashcard_service;

const PHOTOSYNTHESIS: &str = "Photosynthesis is the process by which plants convert light into energy. \
Chlorophyll absorbs sunlight. This process produces oxygen as a byproduct.";

fn request(content: &str, num_flashcards: Option<usize>) -> GenerateFlashcardsRequest {
    GenerateFlashcardsRequest {
        user_id: UserId::new("student-1"),
        set_name: "Biology".to_string(),
        content: content.to_string(),
        note_id: Some("text_Chapter_1".to_string()),
        note_title: Some("Chapter 1".to_string()),
        num_flashcards,
    }
}

#[tokio::test]
async fn given_plain_prose_when_generating_then_synthesizes_three_cards() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository.clone());

    let outcome = service
        .generate_set(request(PHOTOSYNTHESIS, Some(3)))
        .await
        .unwrap();

    let FlashcardOutcome::Created(set) = outcome else {
        panic!("expected a created set, got {:?}", outcome);
    };
    assert_eq!(set.flashcards.len(), 3);
    assert_eq!(set.flashcards[0].question, "What is Photosynthesis?");
    assert_eq!(
        set.flashcards[0].answer,
        "Photosynthesis is the process by which plants convert light into energy."
    );
    assert_eq!(set.flashcards[1].question, "What is Chlorophyll?");
    assert_eq!(set.note_title.as_deref(), Some("Chapter 1"));

    let stored = repository
        .get(&set.user_id, &set.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.flashcards, set.flashcards);
}

#[tokio::test]
async fn given_backend_failure_when_generating_then_falls_back_to_content_sentences() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(FailingSummarizer), repository);

    let outcome = service
        .generate_set(request(PHOTOSYNTHESIS, Some(3)))
        .await
        .unwrap();

    let FlashcardOutcome::Created(set) = outcome else {
        panic!("expected a created set, got {:?}", outcome);
    };
    assert_eq!(set.flashcards.len(), 2);
    assert_eq!(set.flashcards[1].question, "What is Process?");
}

#[tokio::test]
async fn given_under_twenty_words_when_generating_then_content_too_short() {
    let backend = Arc::new(ScriptedSummarizer::always("unused"));
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(backend.clone(), repository);

    let outcome = service
        .generate_set(request("Cells divide by mitosis.", None))
        .await
        .unwrap();

    assert_eq!(outcome, FlashcardOutcome::ContentTooShort { word_count: 4 });
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn given_code_only_padding_when_generating_then_code_does_not_count_as_words() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);
    let content = "Cells divide. ```fn a() {} fn b() {} fn c() {} fn d() {} fn e() {} fn f() {} fn g() {}```";

    let outcome = service.generate_set(request(content, None)).await.unwrap();

    assert!(matches!(outcome, FlashcardOutcome::ContentTooShort { .. }));
}

#[tokio::test]
async fn given_nothing_extractable_when_generating_then_no_flashcards() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(ScriptedSummarizer::always("")), repository);
    let content = "Cells grow. ".repeat(10);

    let outcome = service.generate_set(request(&content, None)).await.unwrap();

    assert_eq!(outcome, FlashcardOutcome::NoFlashcards);
}

#[tokio::test]
async fn given_key_point_request_when_extracting_then_instruction_names_count() {
    let backend = Arc::new(ScriptedSummarizer::always(""));
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(backend.clone(), repository);

    service.extract(PHOTOSYNTHESIS, 40).await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].instruction,
        "Summarize the key points from this text in 15 clear sentences: "
    );
    assert_eq!((requests[0].min_length, requests[0].max_length), (100, 512));
}

#[tokio::test]
async fn given_manual_cards_when_creating_set_then_ids_follow_position() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);

    let outcome = service
        .create_manual_set(
            UserId::new("student-1"),
            "My deck".to_string(),
            None,
            None,
            vec![
                FlashcardDraft::new("What is ATP?", "The energy currency of the cell."),
                FlashcardDraft::new("What is DNA?", "The molecule carrying genetic code."),
            ],
        )
        .await
        .unwrap();

    let FlashcardOutcome::Created(set) = outcome else {
        panic!("expected a created set, got {:?}", outcome);
    };
    assert!(set.id.as_str().starts_with("flashcard_set_My_deck_"));
    assert!(set.flashcards[0].id.as_str().starts_with("card_0_"));
    assert!(set.flashcards[1].id.as_str().starts_with("card_1_"));
}

#[tokio::test]
async fn given_card_with_blank_answer_when_creating_set_then_invalid_flashcard() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);

    let outcome = service
        .create_manual_set(
            UserId::new("student-1"),
            "My deck".to_string(),
            None,
            None,
            vec![
                FlashcardDraft::new("What is ATP?", "The energy currency of the cell."),
                FlashcardDraft::new("What is DNA?", "   "),
            ],
        )
        .await
        .unwrap();

    assert_eq!(outcome, FlashcardOutcome::InvalidFlashcard { index: 1 });
}

#[tokio::test]
async fn given_existing_set_when_replacing_cards_then_sequence_is_reissued() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);
    let user = UserId::new("student-1");
    let FlashcardOutcome::Created(set) = service
        .create_manual_set(
            user.clone(),
            "Deck".to_string(),
            None,
            None,
            vec![FlashcardDraft::new("What is ATP?", "The energy currency of the cell.")],
        )
        .await
        .unwrap()
    else {
        panic!("expected a created set");
    };

    let outcome = service
        .replace_flashcards(
            &user,
            &set.id,
            vec![
                FlashcardDraft::new("What is RNA?", "A single stranded nucleic acid."),
                FlashcardDraft::new("What is a ribosome?", "The site of protein synthesis."),
            ],
        )
        .await
        .unwrap();
    let ReplaceOutcome::Replaced(replaced) = outcome else {
        panic!("expected replaced cards, got {:?}", outcome);
    };

    assert_eq!(replaced.len(), 2);
    let stored = service.get_set(&user, &set.id).await.unwrap().unwrap();
    assert_eq!(stored.flashcards, replaced);
    assert_eq!(stored.flashcards[0].question, "What is RNA?");
}

#[tokio::test]
async fn given_card_with_blank_question_when_replacing_cards_then_set_is_untouched() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);
    let user = UserId::new("student-1");
    let FlashcardOutcome::Created(set) = service
        .create_manual_set(
            user.clone(),
            "Deck".to_string(),
            None,
            None,
            vec![FlashcardDraft::new("What is ATP?", "The energy currency of the cell.")],
        )
        .await
        .unwrap()
    else {
        panic!("expected a created set");
    };

    let outcome = service
        .replace_flashcards(
            &user,
            &set.id,
            vec![
                FlashcardDraft::new("What is RNA?", "A single stranded nucleic acid."),
                FlashcardDraft::new("", "The site of protein synthesis."),
            ],
        )
        .await
        .unwrap();

    assert_eq!(outcome, ReplaceOutcome::InvalidFlashcard { index: 1 });
    let stored = service.get_set(&user, &set.id).await.unwrap().unwrap();
    assert_eq!(stored.flashcards, set.flashcards);
}

#[tokio::test]
async fn given_zero_max_count_when_generating_then_one_card_is_kept() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let policy = FlashcardPolicy {
        max_count: 0,
        ..FlashcardPolicy::default()
    };
    let service = FlashcardService::new(Arc::new(EchoSummarizer), repository, policy);

    let outcome = service
        .generate_set(request(PHOTOSYNTHESIS, Some(3)))
        .await
        .unwrap();

    let FlashcardOutcome::Created(set) = outcome else {
        panic!("expected a created set, got {:?}", outcome);
    };
    assert_eq!(set.flashcards.len(), 1);
}

#[tokio::test]
async fn given_unknown_set_when_replacing_or_deleting_then_reports_missing() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);
    let user = UserId::new("student-1");
    let missing = FlashcardSetId::from_raw("flashcard_set_missing_00000000");

    let replaced = service
        .replace_flashcards(&user, &missing, Vec::new())
        .await
        .unwrap();
    let deleted = service.delete_set(&user, &missing).await.unwrap();

    assert_eq!(replaced, ReplaceOutcome::NotFound);
    assert!(!deleted);
}

#[tokio::test]
async fn given_sets_of_two_users_when_listing_then_only_own_sets_returned() {
    let repository = Arc::new(InMemoryFlashcardSetRepository::new());
    let service = flashcard_service(Arc::new(EchoSummarizer), repository);
    let cards = vec![FlashcardDraft::new("What is ATP?", "The energy currency of the cell.")];
    for (user, name) in [("alice", "A1"), ("alice", "A2"), ("bob", "B1")] {
        service
            .create_manual_set(UserId::new(user), name.to_string(), None, None, cards.clone())
            .await
            .unwrap();
    }

    let sets = service.list_sets(&UserId::new("alice")).await.unwrap();

    assert_eq!(sets.len(), 2);
    assert!(sets.iter().all(|s| s.name.starts_with('A')));
    assert!(sets.iter().all(|s| s.flashcard_count == 1));
}
