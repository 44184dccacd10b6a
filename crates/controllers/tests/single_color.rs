use amiacs_controllers::{
    test_utils::{ChipEvent, RecordingChipClient},
    ChannelMap, Offset, OverrunPolicy, Reversed, SingleColorChipController, Table,
};
use amiacs_core::{
    math8::map8_to, Brightness, ConfigurationError, Controller, ControllerKind, ControllerState, Error,
    MaxChannel, Pin, SegmentConfig, SlicePixels, RGB8,
};

const CAPACITY: usize = 24;

fn segment() -> SegmentConfig {
    SegmentConfig::new(CAPACITY, Pin(5), Pin(4), Pin(6))
}

fn gray(value: u8) -> RGB8 {
    RGB8::new(value, value, value)
}

fn ready_controller() -> SingleColorChipController<RecordingChipClient> {
    let _ = env_logger::try_init();

    let mut controller = SingleColorChipController::new(RecordingChipClient::default(), segment())
        .unwrap();
    controller.init().unwrap();
    controller
}

/// Returns chip events recorded after the initialization.
fn frame_events<B: Brightness, M: ChannelMap>(
    controller: &SingleColorChipController<RecordingChipClient, B, M>,
) -> Vec<ChipEvent> {
    controller.session().unwrap().events()[CAPACITY + 2..].to_vec()
}

#[test]
fn test_chip_init_starts_dark() {
    let _ = env_logger::try_init();

    let mut controller = SingleColorChipController::new(RecordingChipClient::default(), segment())
        .unwrap();
    assert_eq!(controller.state(), ControllerState::Uninitialized);
    assert!(controller.session().is_none());

    controller.init().unwrap();
    assert_eq!(controller.state(), ControllerState::Ready);

    let chip = controller.session().unwrap();
    let mut expected = vec![ChipEvent::Begin];
    expected.extend((0..CAPACITY).map(|channel| ChipEvent::Set { channel, level: 0 }));
    expected.push(ChipEvent::Commit);
    assert_eq!(chip.events(), expected);
    assert_eq!(chip.committed(), [0; CAPACITY]);
}

#[test]
fn test_chip_single_commit_after_all_assignments() {
    let mut controller = ready_controller();

    let frame = (0..10).map(|i| gray(i * 20)).collect::<Vec<_>>();
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();

    let events = frame_events(&controller);
    assert_eq!(events.len(), frame.len() + 1);
    assert!(events[..frame.len()]
        .iter()
        .all(|event| matches!(event, ChipEvent::Set { .. })));
    assert_eq!(events.last(), Some(&ChipEvent::Commit));
}

#[test]
fn test_chip_nth_pixel_drives_nth_channel() {
    let mut controller = ready_controller();

    let frame = (0..CAPACITY as u8).map(|i| gray(i * 10)).collect::<Vec<_>>();
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();

    let committed = controller.session().unwrap().committed();
    for (channel, level) in committed.iter().enumerate() {
        assert_eq!(*level, map8_to(channel as u8 * 10, 4095));
    }

    let expected = (0..CAPACITY)
        .map(|channel| ChipEvent::Set {
            channel,
            level: map8_to(channel as u8 * 10, 4095),
        })
        .chain(std::iter::once(ChipEvent::Commit))
        .collect::<Vec<_>>();
    assert_eq!(frame_events(&controller), expected);
}

#[test]
fn test_chip_empty_frame_still_commits() {
    let mut controller = ready_controller();

    controller.show_pixels(&mut SlicePixels::new(&[])).unwrap();
    assert_eq!(frame_events(&controller), [ChipEvent::Commit]);
    assert_eq!(controller.session().unwrap().committed(), [0; CAPACITY]);

    let frame = [gray(255)];
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();

    let chip = controller.session().unwrap();
    assert_eq!(chip.commits(), 3);
    assert_eq!(chip.committed()[0], 4095);
    assert!(chip.committed()[1..].iter().all(|level| *level == 0));
}

#[test]
fn test_chip_luma_of_colors() {
    let mut controller = ready_controller();

    let frame = [
        RGB8::new(255, 0, 0),
        RGB8::new(0, 255, 0),
        RGB8::new(0, 0, 255),
        RGB8::new(10, 20, 30),
    ];
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();

    let committed = controller.session().unwrap().committed();
    assert_eq!(
        committed[..4],
        [map8_to(54, 4095), map8_to(183, 4095), map8_to(18, 4095), map8_to(19, 4095)]
    );
}

#[test]
fn test_chip_overrun_is_rejected() {
    let mut controller = ready_controller();

    let frame = vec![gray(255); CAPACITY + 1];
    let err = controller
        .show_pixels(&mut SlicePixels::new(&frame))
        .unwrap_err();
    assert_eq!(
        err,
        Error::ChannelOverrun {
            channel: CAPACITY,
            capacity: CAPACITY
        }
    );

    let chip = controller.session().unwrap();
    // Only the initial commit.
    assert_eq!(chip.commits(), 1);
    assert_eq!(chip.committed(), [0; CAPACITY]);
}

#[test]
fn test_chip_rejected_frame_is_not_shown_later() {
    let mut controller = ready_controller();

    let frame = vec![gray(255); CAPACITY + 1];
    assert!(controller.show_pixels(&mut SlicePixels::new(&frame)).is_err());
    // Nothing of the rejected frame reached the chip registers.
    assert!(frame_events(&controller).is_empty());

    controller
        .show_pixels(&mut SlicePixels::new(&[gray(0)]))
        .unwrap();
    assert_eq!(controller.session().unwrap().committed(), [0; CAPACITY]);
}

#[test]
fn test_chip_unmapped_position_rejects_whole_frame() {
    let mut controller = ready_controller().with_channel_map(Table([0, 1, 2]));

    let frame = [gray(255); 4];
    let mut pixels = SlicePixels::new(&frame);
    assert_eq!(
        controller.show_pixels(&mut pixels),
        Err(Error::ChannelOverrun {
            channel: 3,
            capacity: CAPACITY
        })
    );
    assert_eq!(pixels.remaining(), 4);
    assert!(frame_events(&controller).is_empty());
}

#[test]
fn test_chip_overrun_is_truncated() {
    let mut controller = ready_controller().with_overrun_policy(OverrunPolicy::Truncate);

    let frame = vec![gray(255); CAPACITY + 5];
    let mut pixels = SlicePixels::new(&frame);
    controller.show_pixels(&mut pixels).unwrap();

    assert_eq!(pixels.remaining(), 5);
    let events = frame_events(&controller);
    assert_eq!(events.len(), CAPACITY + 1);
    assert_eq!(events.last(), Some(&ChipEvent::Commit));
    assert_eq!(controller.session().unwrap().committed(), [4095; CAPACITY]);
}

#[test]
fn test_chip_channel_maps() {
    let frame = [gray(255), gray(51)];

    let mut controller = ready_controller().with_channel_map(Offset(3));
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    let committed = controller.session().unwrap().committed();
    assert_eq!(committed[..5], [0, 0, 0, 4095, 819]);

    let mut controller = ready_controller().with_channel_map(Reversed(CAPACITY));
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    let committed = controller.session().unwrap().committed();
    assert_eq!(committed[CAPACITY - 2..], [819, 4095]);

    let mut controller = ready_controller().with_channel_map(Table([7, 2]));
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    let committed = controller.session().unwrap().committed();
    assert_eq!(committed[7], 4095);
    assert_eq!(committed[2], 819);

    // A position missing in the table is an overrun.
    let mut controller = ready_controller().with_channel_map(Table([7]));
    assert_eq!(
        controller.show_pixels(&mut SlicePixels::new(&frame)),
        Err(Error::ChannelOverrun {
            channel: 1,
            capacity: CAPACITY
        })
    );

    let mut controller = ready_controller().with_channel_map(|position: usize| Some(position + 30));
    assert_eq!(
        controller.show_pixels(&mut SlicePixels::new(&frame)),
        Err(Error::ChannelOverrun {
            channel: 30,
            capacity: CAPACITY
        })
    );
}

#[test]
fn test_chip_brightness_strategy() {
    let frame = [RGB8::new(0, 0, 255)];

    let mut controller = ready_controller().with_brightness(MaxChannel);
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    assert_eq!(controller.session().unwrap().committed()[0], 4095);

    let mut controller = ready_controller().with_brightness(|color: RGB8| color.r);
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    assert_eq!(controller.session().unwrap().committed()[0], 0);
}

#[test]
fn test_chip_init_twice_reuses_session() {
    let mut controller = ready_controller();

    let frame = [gray(255); 3];
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    controller.init().unwrap();

    assert_eq!(controller.client().opened(), 1);
    let chip = controller.session().unwrap();
    assert_eq!(chip.committed(), [0; CAPACITY]);
    assert_eq!(
        chip.events()
            .iter()
            .filter(|event| **event == ChipEvent::Begin)
            .count(),
        1
    );
}

#[test]
fn test_chip_failed_init_is_not_ready() {
    let _ = env_logger::try_init();

    let client = RecordingChipClient::default().with_failing_commits(1);
    let mut controller = SingleColorChipController::new(client, segment()).unwrap();

    assert_eq!(controller.init(), Err(Error::Output));
    assert_eq!(controller.state(), ControllerState::Uninitialized);
    assert_eq!(
        controller.show_pixels(&mut SlicePixels::new(&[gray(255)])),
        Err(Error::NotInitialized)
    );

    controller.init().unwrap();
    assert_eq!(controller.state(), ControllerState::Ready);
    assert_eq!(controller.client().opened(), 1);
    assert_eq!(controller.session().unwrap().commits(), 1);
}

#[test]
fn test_chip_init_retry_keeps_session_after_failed_begin() {
    let _ = env_logger::try_init();

    let client = RecordingChipClient::exclusive().with_failing_begins(1);
    let mut controller = SingleColorChipController::new(client, segment()).unwrap();

    assert_eq!(controller.init(), Err(Error::Output));
    assert_eq!(controller.state(), ControllerState::Uninitialized);

    controller.init().unwrap();
    assert_eq!(controller.state(), ControllerState::Ready);
    assert_eq!(controller.client().opened(), 1);
    assert_eq!(controller.session().unwrap().events()[0], ChipEvent::Begin);
}

#[test]
fn test_chip_controller_debug() {
    let controller = ready_controller();

    let formatted = format!("{controller:?}");
    assert!(formatted.starts_with("SingleColorChipController"));
    assert!(formatted.contains("Ready"));
}

#[test]
fn test_chip_requires_init() {
    let mut controller = SingleColorChipController::new(RecordingChipClient::default(), segment())
        .unwrap();

    assert_eq!(
        controller.show_pixels(&mut SlicePixels::new(&[gray(1)])),
        Err(Error::NotInitialized)
    );
}

#[test]
fn test_chip_rejects_bad_segment() {
    let config = SegmentConfig::new(0, Pin(5), Pin(4), Pin(6));
    assert_eq!(
        SingleColorChipController::new(RecordingChipClient::default(), config).err(),
        Some(Error::Configuration(ConfigurationError::EmptySegment))
    );

    let config = SegmentConfig::new(CAPACITY, Pin(5), Pin(4), Pin(4));
    assert_eq!(
        SingleColorChipController::new(RecordingChipClient::default(), config).err(),
        Some(Error::Configuration(ConfigurationError::DuplicatePin(4)))
    );
}

#[test]
fn test_chip_segment_is_exclusive() {
    let mut first = SingleColorChipController::new(RecordingChipClient::exclusive(), segment())
        .unwrap();
    first.init().unwrap();
    // Re-initialization keeps the already opened session.
    first.init().unwrap();
    assert_eq!(first.client().opened(), 1);
}

#[test]
fn test_chip_is_streaming() {
    assert_eq!(
        <SingleColorChipController<RecordingChipClient> as Controller>::KIND,
        ControllerKind::Streaming
    );
}
