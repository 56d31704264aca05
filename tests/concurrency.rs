//! Many writers against a file-backed database with a real connection pool.

use std::collections::BTreeSet;

use friendgraph::{
    db,
    error::SocialError,
    friends::{requests, Decision, FriendRequestWorkflow, RequestStatus},
    profiles::{store as profiles, NewProfile},
};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::task::JoinSet;

const SENDERS: usize = 12;
const COPIES: usize = 6;

async fn file_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("friends.db").display());
    let db_pool = db::connect(&url, 16).await.unwrap();
    (dir, db_pool)
}

fn email(n: usize) -> String {
    format!("u{n}@x.com")
}

async fn register_users(db_pool: &SqlitePool, count: usize) {
    for n in 0..count {
        profiles::create(db_pool, &NewProfile {
            name: format!("User {n}"),
            email: email(n),
            gender: None,
        })
        .await
        .unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_sends_and_accepts_stay_consistent() {
    let (_dir, db_pool) = file_pool().await;
    let workflow = FriendRequestWorkflow::new(db_pool.clone());
    register_users(&db_pool, SENDERS + 1).await;

    // every sender fires the same request at u0 several times at once
    let mut sends = JoinSet::new();
    for _ in 0..COPIES {
        for n in 1..=SENDERS {
            let workflow = workflow.clone();
            sends.spawn(async move { (n, workflow.send(&email(n), &email(0)).await) });
        }
    }

    let mut created = vec![0usize; SENDERS + 1];
    while let Some(joined) = sends.join_next().await {
        let (n, outcome) = joined.unwrap();
        match outcome {
            Ok(request) => {
                assert_eq!(request.status, RequestStatus::Pending);
                created[n] += 1;
            }
            Err(SocialError::DuplicateRequest) => {}
            Err(err) => panic!("send from {} failed: {err:?}", email(n)),
        }
    }
    assert!(created[1..].iter().all(|&count| count == 1), "{created:?}");

    let receiver = profiles::find_by_email(&db_pool, &email(0)).await.unwrap().unwrap();
    let pending = requests::find_by_receiver(&db_pool, receiver.id, RequestStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.len(), SENDERS);

    // u0 accepts everyone at once, twice over; each pair touches u0's friend set
    let mut accepts = JoinSet::new();
    for _ in 0..2 {
        for n in 1..=SENDERS {
            let workflow = workflow.clone();
            accepts.spawn(async move {
                (n, workflow.resolve(&email(0), &email(n), Decision::Accept).await)
            });
        }
    }
    while let Some(joined) = accepts.join_next().await {
        let (n, outcome) = joined.unwrap();
        let request = outcome.unwrap_or_else(|err| panic!("accepting {} failed: {err:?}", email(n)));
        assert_eq!(request.status, RequestStatus::Accepted);
    }

    let friends_of_u0: BTreeSet<_> = workflow
        .list_friends(&email(0))
        .await
        .unwrap()
        .into_iter()
        .map(|friend| friend.email)
        .collect();
    let everyone: BTreeSet<_> = (1..=SENDERS).map(email).collect();
    assert_eq!(friends_of_u0, everyone);

    for n in 1..=SENDERS {
        let friends: Vec<_> = workflow
            .list_friends(&email(n))
            .await
            .unwrap()
            .into_iter()
            .map(|friend| friend.email)
            .collect();
        assert_eq!(friends, [email(0)]);
    }
}
