// Command descriptor table - one static entry per protocol command
//
// The table is the single source of truth for wire codes, parameter ordering,
// addressing, and reply shapes. It is built once as 'static data and shared
// read-only by every client call; the router requires the exact per-command
// parameter order reproduced here.

use crate::codec::ReplyShape;
use crate::datatypes::ParamKey;
use crate::macros::command_table;

/// Whether a command reads a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    /// Sends a frame and blocks for the terminated reply.
    Query,
    /// Sends a frame and returns without reading. The router's
    /// acknowledgement, if any, is not consumed.
    Action,
}

/// How a command names its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Addressing {
    /// No address or group parameter; applies to the router itself.
    Router,
    /// The `@` parameter carries the bare cluster number.
    Cluster,
    /// The `G` parameter carries a group identifier.
    Group,
    /// The `@` parameter carries a full `cluster.member.subnet.device`
    /// address.
    Device,
}

/// Static description of one protocol command.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub id: CommandId,
    /// Operation name used in logs and error context.
    pub name: &'static str,
    pub kind: CommandKind,
    pub addressing: Addressing,
    /// Complete ordered parameter keys, `Version` and `Command` included.
    pub params: &'static [ParamKey],
    pub reply: ReplyShape,
}

command_table! {
    /// Recalls a stored scene for every device in a group.
    RecallSceneGroup = 11, "recall scene on group", Action, Group,
        [Group, Block, Scene, FadeTime], None;
    /// Recalls a stored scene on a single device. The address parameter
    /// trails the scene selection on the wire.
    RecallSceneDevice = 12, "recall scene on device", Action, Device,
        [Block, Scene, FadeTime, Address], None;
    SetLevelGroup = 13, "set level on group", Action, Group,
        [Group, Level, FadeTime], None;
    SetLevelDevice = 14, "set level on device", Action, Device,
        [Level, FadeTime, Address], None;

    /// Lists the cluster numbers visible on the network.
    QueryClusters = 101, "query clusters", Query, Router,
        [], List;
    /// Lists the router member numbers within this client's cluster.
    QueryRouters = 102, "query routers", Query, Cluster,
        [Address], List;
    QueryLastSceneInBlock = 103, "query last scene in block", Query, Group,
        [Group, Block], Scalar;
    QueryDeviceType = 104, "query device type", Query, Device,
        [Address], Scalar;
    QueryGroupDescription = 105, "query group description", Query, Group,
        [Group], Scalar;
    QueryDeviceDescription = 106, "query device description", Query, Device,
        [Address], Scalar;
    QueryDeviceState = 110, "query device state", Query, Device,
        [Address], Scalar;
    QueryDeviceDisabled = 111, "query device disabled", Query, Device,
        [Address], Boolean;
    QueryDeviceMissing = 113, "query device missing", Query, Device,
        [Address], Boolean;
    QueryDeviceFaulty = 114, "query device faulty", Query, Device,
        [Address], Boolean;
    QueryEmergencyBatteryFailure = 129, "query emergency battery failure", Query, Device,
        [Address], Boolean;
    QueryMeasurement = 150, "query measurement", Query, Device,
        [Address], Scalar;
    QueryInputState = 151, "query input state", Query, Device,
        [Address], Scalar;
    QueryLoadLevel = 152, "query load level", Query, Device,
        [Address], Scalar;
    QueryDevicePowerConsumption = 160, "query device power consumption", Query, Device,
        [Address], Scalar;
    QueryGroupPowerConsumption = 161, "query group power consumption", Query, Group,
        [Group], Scalar;
    QueryEmergencyFunctionTestTime = 170, "query emergency function test time", Query, Device,
        [Address], Scalar;
    QueryEmergencyFunctionTestState = 171, "query emergency function test state", Query, Device,
        [Address], Scalar;
    QueryEmergencyDurationTestTime = 172, "query emergency duration test time", Query, Device,
        [Address], Scalar;
    QueryEmergencyDurationTestState = 173, "query emergency duration test state", Query, Device,
        [Address], Scalar;
    QueryEmergencyBatteryCharge = 174, "query emergency battery charge", Query, Device,
        [Address], Scalar;
    QueryEmergencyBatteryTime = 175, "query emergency battery time", Query, Device,
        [Address], Scalar;
    QueryEmergencyTotalLampTime = 176, "query emergency total lamp time", Query, Device,
        [Address], Scalar;
    /// Router wall-clock time as Unix epoch seconds.
    QueryTime = 185, "query time", Query, Router,
        [], Scalar;
    QueryLongitude = 186, "query longitude", Query, Router,
        [], Scalar;
    QueryLatitude = 187, "query latitude", Query, Router,
        [], Scalar;
    QueryTimeZone = 188, "query time zone", Query, Router,
        [], Scalar;
    QueryDaylightSaving = 189, "query daylight saving", Query, Router,
        [], Boolean;
    QuerySoftwareVersion = 190, "query software version", Query, Router,
        [], Scalar;
    QueryProtocolVersion = 191, "query protocol version", Query, Router,
        [], Scalar;

    /// Stores an explicit level as a scene. The force flag rides directly
    /// behind the group parameter.
    StoreSceneGroup = 201, "store scene on group", Action, Group,
        [Group, ForceStore, Block, Scene, Level], None;
    StoreSceneDevice = 202, "store scene on device", Action, Device,
        [Address, ForceStore, Block, Scene, Level], None;
    StoreCurrentSceneGroup = 203, "store current scene on group", Action, Group,
        [Group, ForceStore, Block, Scene], None;
    StoreCurrentSceneDevice = 204, "store current scene on device", Action, Device,
        [Address, ForceStore, Block, Scene], None;
    ResetEmergencyBatteryGroup = 205, "reset emergency battery time on group", Action, Group,
        [Group], None;
    ResetEmergencyBatteryDevice = 206, "reset emergency battery time on device", Action, Device,
        [Address], None;
    /// Sets the router clock from Unix epoch seconds.
    SetTime = 241, "set time", Action, Router,
        [Time], None;
    /// Sets the UTC offset in signed seconds.
    SetTimeZone = 244, "set time zone", Action, Router,
        [TimeZone], None;
    SetDaylightSaving = 245, "set daylight saving", Action, Router,
        [Daylight], None;
}
