use chrono::NaiveDate;
use leadcomm::domain::commission::compute_commission;
use leadcomm::domain::lead::Lead;
use leadcomm::domain::ports::{CommissionStoreBox, ContactDirectoryBox, LeadStoreBox};
use leadcomm::domain::record::CommissionRecord;
use leadcomm::infrastructure::in_memory::{
    InMemoryCommissionStore, InMemoryLeadStore, StaticContactDirectory,
};
use leadcomm::domain::contact::Contact;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let lead_store: LeadStoreBox = Box::new(InMemoryLeadStore::new());
    let commission_store: CommissionStoreBox = Box::new(InMemoryCommissionStore::new());
    let directory: ContactDirectoryBox =
        Box::new(StaticContactDirectory::from_contacts(vec![Contact::new("Acme", "1")]));

    let affiliation = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let reference = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let lead = Lead::new("Acme", "acme@example.com", affiliation);
    let result = compute_commission(affiliation, reference, 42).unwrap();
    let record = CommissionRecord::new("Acme", 42, &result, reference, true);

    // Verify Send + Sync by spawning tasks
    let lead_handle = tokio::spawn(async move {
        lead_store.store(lead).await.unwrap();
        lead_store.get("Acme").await.unwrap().unwrap()
    });

    let record_handle = tokio::spawn(async move {
        commission_store.append(record).await.unwrap();
        commission_store.get_all().await.unwrap()
    });

    let directory_handle = tokio::spawn(async move { directory.search("acme").await.unwrap() });

    assert_eq!(lead_handle.await.unwrap().name, "Acme");
    let records = record_handle.await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].shipments, 42);
    assert_eq!(directory_handle.await.unwrap(), Some("1".to_string()));
}

#[tokio::test]
async fn test_engine_is_safe_to_call_concurrently() {
    let affiliation = NaiveDate::from_ymd_opt(2024, 3, 22).unwrap();
    let reference = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();

    let handles: Vec<_> = (0..64)
        .map(|_| tokio::spawn(async move { compute_commission(affiliation, reference, 150).unwrap() }))
        .collect();

    let expected = compute_commission(affiliation, reference, 150).unwrap();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
